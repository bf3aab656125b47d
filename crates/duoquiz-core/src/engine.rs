//! The progression controller.
//!
//! A [`Session`] walks the catalog level by level and question by question.
//! It reacts to exactly two triggers, [`Session::start`] and
//! [`Session::select`], and each call runs the transition chain through the
//! transient loading states until the session rests in
//! [`SessionState::AwaitingAnswer`] or [`SessionState::Completed`].

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assign::{assign_slots, SlotAssignment};
use crate::catalog::Catalog;
use crate::error::SessionError;
use crate::model::{Progress, Slot};
use crate::presenter::Presenter;

/// Configuration for a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed for answer placement and reaction choice. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Re-send the current question and both slots after a wrong-answer reaction.
    #[serde(default)]
    pub repeat_question_on_wrong: bool,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    LoadingLevel(usize),
    LoadingQuestion,
    AwaitingAnswer,
    Completed,
}

/// What a call to [`Session::select`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// Not awaiting an answer, or the slot index is not 0 or 1.
    Ignored,
    /// Wrong slot; the same question and slots stay up.
    Wrong,
    /// Correct; the next question of the same level is up.
    Advanced,
    /// Correct; that finished the level and a later level is up.
    LevelComplete,
    /// Correct; that finished the last level.
    Completed,
}

/// A single play-through of a catalog.
pub struct Session<P: Presenter> {
    id: Uuid,
    catalog: Arc<Catalog>,
    presenter: P,
    rng: StdRng,
    config: SessionConfig,
    state: SessionState,
    progress: Progress,
    assignment: Option<SlotAssignment>,
}

impl<P: Presenter> Session<P> {
    pub fn new(catalog: impl Into<Arc<Catalog>>, presenter: P, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            id: Uuid::new_v4(),
            catalog: catalog.into(),
            presenter,
            rng,
            config,
            state: SessionState::NotStarted,
            progress: Progress::default(),
            assignment: None,
        }
    }

    /// Begin the session at the first level.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        tracing::info!(
            session = %self.id,
            levels = self.catalog.len(),
            questions = self.catalog.total_questions(),
            "session started"
        );
        self.run(SessionState::LoadingLevel(0))
    }

    /// Handle the player picking slot `slot_index`.
    ///
    /// Selections that arrive outside [`SessionState::AwaitingAnswer`] or name
    /// a slot other than 0 or 1 are ignored.
    pub fn select(&mut self, slot_index: usize) -> Result<SelectionOutcome, SessionError> {
        if self.state != SessionState::AwaitingAnswer {
            tracing::debug!(session = %self.id, slot_index, state = ?self.state, "selection ignored");
            return Ok(SelectionOutcome::Ignored);
        }
        let Some(slot) = Slot::from_index(slot_index) else {
            tracing::debug!(session = %self.id, slot_index, "selection for unbound slot ignored");
            return Ok(SelectionOutcome::Ignored);
        };
        let Some(bound_value) = self.assignment.as_ref().map(|a| a.value_at(slot)) else {
            return Ok(SelectionOutcome::Ignored);
        };
        let Some(question) = self
            .catalog
            .question(self.progress.level, self.progress.question)
        else {
            return Ok(SelectionOutcome::Ignored);
        };

        if bound_value != question.correct_value {
            let animation = question.level.wrong_answer_animations.choose(&mut self.rng);
            tracing::debug!(
                session = %self.id,
                level = self.progress.level,
                question = self.progress.question,
                slot = slot.index(),
                "wrong answer"
            );
            self.presenter.show_wrong_answer_reaction(animation);
            if self.config.repeat_question_on_wrong {
                self.present_current();
            }
            return Ok(SelectionOutcome::Wrong);
        }

        let level_before = self.progress.level;
        self.progress.question += 1;
        self.run(SessionState::LoadingQuestion)?;

        Ok(if self.state == SessionState::Completed {
            SelectionOutcome::Completed
        } else if self.progress.level != level_before {
            SelectionOutcome::LevelComplete
        } else {
            SelectionOutcome::Advanced
        })
    }

    fn run(&mut self, mut next: SessionState) -> Result<(), SessionError> {
        loop {
            self.state = next;
            match next {
                SessionState::LoadingLevel(index) => {
                    self.progress.level = index;
                    let Some(level) = self.catalog.level(index) else {
                        self.assignment = None;
                        self.state = SessionState::Completed;
                        tracing::info!(session = %self.id, "all levels complete");
                        self.presenter.show_completion();
                        return Ok(());
                    };
                    self.progress.question = 0;
                    tracing::info!(
                        session = %self.id,
                        level = %level.id,
                        index,
                        questions = level.question_count(),
                        "entering level"
                    );
                    self.presenter.show_level_intro(index, level);
                    next = SessionState::LoadingQuestion;
                }
                SessionState::LoadingQuestion => {
                    let Progress { level, question } = self.progress;
                    if question >= self.catalog.question_count(level) {
                        next = SessionState::LoadingLevel(level + 1);
                        continue;
                    }
                    // Drop the old binding before building the new one.
                    self.assignment = None;
                    self.assignment = Some(assign_slots(
                        &self.catalog,
                        level,
                        question,
                        &mut self.rng,
                    )?);
                    self.present_current();
                    self.state = SessionState::AwaitingAnswer;
                    return Ok(());
                }
                SessionState::NotStarted
                | SessionState::AwaitingAnswer
                | SessionState::Completed => return Ok(()),
            }
        }
    }

    fn present_current(&mut self) {
        let (Some(assignment), Some(question)) = (
            self.assignment.as_ref(),
            self.catalog
                .question(self.progress.level, self.progress.question),
        ) else {
            return;
        };
        self.presenter.show_question(question.text, question.image);
        for slot in Slot::ALL {
            let binding = assignment.binding(slot);
            self.presenter
                .show_answer_slot(slot, &binding.text, binding.image.as_ref());
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// The binding for the question on screen, if any.
    pub fn assignment(&self) -> Option<&SlotAssignment> {
        self.assignment.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

//! The presentation surface a session drives.
//!
//! Rendering, animation playback and asset loading live behind this trait.
//! Every call is fire-and-forget; the surface reports player input back by
//! calling [`Session::select`](crate::engine::Session::select).

use serde::{Deserialize, Serialize};

use crate::model::{AssetRef, Level, Slot};

// ---------------------------------------------------------------------------
// Presenter trait
// ---------------------------------------------------------------------------

/// Display side of a quiz session.
pub trait Presenter {
    /// A new level begins. `index` is its zero-based position in the catalog.
    fn show_level_intro(&mut self, index: usize, level: &Level);

    fn show_question(&mut self, text: &str, image: Option<&AssetRef>);

    /// Called once for each slot after every `show_question`.
    fn show_answer_slot(&mut self, slot: Slot, text: &str, image: Option<&AssetRef>);

    /// The player picked the wrong slot. `None` when the level has no reactions.
    fn show_wrong_answer_reaction(&mut self, animation: Option<&AssetRef>);

    /// Every level is complete.
    fn show_completion(&mut self);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn show_level_intro(&mut self, index: usize, level: &Level) {
        (**self).show_level_intro(index, level)
    }

    fn show_question(&mut self, text: &str, image: Option<&AssetRef>) {
        (**self).show_question(text, image)
    }

    fn show_answer_slot(&mut self, slot: Slot, text: &str, image: Option<&AssetRef>) {
        (**self).show_answer_slot(slot, text, image)
    }

    fn show_wrong_answer_reaction(&mut self, animation: Option<&AssetRef>) {
        (**self).show_wrong_answer_reaction(animation)
    }

    fn show_completion(&mut self) {
        (**self).show_completion()
    }
}

/// Presenter that discards everything.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn show_level_intro(&mut self, _: usize, _: &Level) {}
    fn show_question(&mut self, _: &str, _: Option<&AssetRef>) {}
    fn show_answer_slot(&mut self, _: Slot, _: &str, _: Option<&AssetRef>) {}
    fn show_wrong_answer_reaction(&mut self, _: Option<&AssetRef>) {}
    fn show_completion(&mut self) {}
}

// ---------------------------------------------------------------------------
// Owned event records
// ---------------------------------------------------------------------------

/// An owned record of one presenter call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresentationEvent {
    LevelIntro {
        index: usize,
        id: String,
        name: String,
        #[serde(default)]
        animation: Option<AssetRef>,
    },
    Question {
        text: String,
        #[serde(default)]
        image: Option<AssetRef>,
    },
    AnswerSlot {
        slot: Slot,
        text: String,
        #[serde(default)]
        image: Option<AssetRef>,
    },
    WrongAnswerReaction {
        #[serde(default)]
        animation: Option<AssetRef>,
    },
    Completion,
}

impl PresentationEvent {
    pub fn level_intro(index: usize, level: &Level) -> Self {
        PresentationEvent::LevelIntro {
            index,
            id: level.id.clone(),
            name: level.display_name().to_string(),
            animation: level.intro_animation.clone(),
        }
    }

    pub fn question(text: &str, image: Option<&AssetRef>) -> Self {
        PresentationEvent::Question {
            text: text.to_string(),
            image: image.cloned(),
        }
    }

    pub fn answer_slot(slot: Slot, text: &str, image: Option<&AssetRef>) -> Self {
        PresentationEvent::AnswerSlot {
            slot,
            text: text.to_string(),
            image: image.cloned(),
        }
    }

    pub fn wrong_answer_reaction(animation: Option<&AssetRef>) -> Self {
        PresentationEvent::WrongAnswerReaction {
            animation: animation.cloned(),
        }
    }
}

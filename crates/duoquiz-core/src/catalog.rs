//! The validated, immutable level catalog.

use std::collections::HashSet;

use crate::error::{ContentError, ContentField};
use crate::model::{AssetRef, Level};

/// An ordered, validated sequence of levels.
///
/// The only way to build one is [`Catalog::new`], which rejects content a
/// session could not play through. Once built it is never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    name: String,
    description: String,
    levels: Vec<Level>,
}

/// Everything needed to display one question and its correct answer.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    pub level: &'a Level,
    pub index: usize,
    pub text: &'a str,
    pub image: Option<&'a AssetRef>,
    pub correct_value: usize,
    pub correct_text: &'a str,
    pub correct_image: Option<&'a AssetRef>,
}

/// An entry of a level's wrong-answer pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrongAnswer<'a> {
    pub index: usize,
    pub text: &'a str,
    pub image: Option<&'a AssetRef>,
}

impl Catalog {
    /// Validate `levels` and wrap them in a catalog.
    pub fn new(levels: Vec<Level>) -> Result<Self, ContentError> {
        let mut seen_ids = HashSet::new();
        for (index, level) in levels.iter().enumerate() {
            validate_level(index, level)?;
            if !seen_ids.insert(level.id.as_str()) {
                return Err(ContentError::DuplicateLevelId(level.id.clone()));
            }
        }

        Ok(Self {
            name: String::new(),
            description: String::new(),
            levels,
        })
    }

    pub fn with_metadata(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.name = name.into();
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Number of questions in a level, or 0 for an unknown level.
    pub fn question_count(&self, level: usize) -> usize {
        self.level(level).map_or(0, Level::question_count)
    }

    pub fn total_questions(&self) -> usize {
        self.levels.iter().map(Level::question_count).sum()
    }

    pub fn question(&self, level: usize, question: usize) -> Option<QuestionView<'_>> {
        let lvl = self.level(level)?;
        Some(QuestionView {
            level: lvl,
            index: question,
            text: lvl.questions.get(question)?,
            image: lvl.question_image(question),
            correct_value: *lvl.correct_sequence.get(question)?,
            correct_text: lvl.answers.get(question)?,
            correct_image: lvl.answer_image(question),
        })
    }

    pub fn wrong_answer(&self, level: usize, index: usize) -> Option<WrongAnswer<'_>> {
        let lvl = self.level(level)?;
        Some(WrongAnswer {
            index,
            text: lvl.wrong_answers.get(index)?,
            image: lvl.wrong_image(index),
        })
    }

    pub fn wrong_pool_len(&self, level: usize) -> usize {
        self.level(level).map_or(0, |l| l.wrong_answers.len())
    }
}

fn validate_level(index: usize, level: &Level) -> Result<(), ContentError> {
    if level.id.trim().is_empty() {
        return Err(ContentError::BlankLevelId(index));
    }

    let expected = level.questions.len();
    for (field, actual) in [
        (ContentField::Answers, level.answers.len()),
        (ContentField::CorrectSequence, level.correct_sequence.len()),
    ] {
        if actual != expected {
            return Err(ContentError::MisalignedLists {
                level: level.id.clone(),
                field,
                expected,
                actual,
            });
        }
    }

    for (field, texts) in [
        (ContentField::Questions, &level.questions),
        (ContentField::Answers, &level.answers),
        (ContentField::WrongAnswers, &level.wrong_answers),
    ] {
        if let Some(blank) = texts.iter().position(|t| t.trim().is_empty()) {
            return Err(ContentError::BlankText {
                level: level.id.clone(),
                field,
                index: blank,
            });
        }
    }

    for (question, &correct_value) in level.correct_sequence.iter().enumerate() {
        if level.wrong_candidates(correct_value).is_empty() {
            return Err(ContentError::ExhaustedPool {
                level: level.id.clone(),
                question,
                correct_value,
                pool_len: level.wrong_answers.len(),
            });
        }
    }

    Ok(())
}

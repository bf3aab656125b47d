//! Core data model types for duoquiz.
//!
//! A [`Level`] is authored content: index-aligned question, answer and
//! correct-value lists plus a level-wide pool of wrong answers. Optional
//! image lists may be shorter than the lists they annotate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an image or animation owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One level of the quiz.
///
/// Entry `i` of `questions`, `answers` and `correct_sequence` together
/// describe question `i`. A correct value lives in the same index space as
/// `wrong_answers`: the wrong answer at that index is never offered
/// alongside the question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Stable identifier for logs and diagnostics.
    pub id: String,
    /// Human-readable title. Falls back to `id` when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Played by the presentation layer when the level starts.
    #[serde(default)]
    pub intro_animation: Option<AssetRef>,
    /// Question prompts.
    pub questions: Vec<String>,
    /// Correct answer text, one per question.
    pub answers: Vec<String>,
    /// Correct value, one per question.
    pub correct_sequence: Vec<usize>,
    /// Level-wide pool of wrong answers.
    pub wrong_answers: Vec<String>,
    #[serde(default)]
    pub question_images: Vec<Option<AssetRef>>,
    #[serde(default)]
    pub answer_images: Vec<Option<AssetRef>>,
    #[serde(default)]
    pub wrong_images: Vec<Option<AssetRef>>,
    /// Reaction animations; one is picked at random on a wrong answer.
    #[serde(default)]
    pub wrong_answer_animations: Vec<AssetRef>,
}

impl Level {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question_image(&self, question: usize) -> Option<&AssetRef> {
        lookup_image(&self.question_images, question)
    }

    pub fn answer_image(&self, question: usize) -> Option<&AssetRef> {
        lookup_image(&self.answer_images, question)
    }

    pub fn wrong_image(&self, index: usize) -> Option<&AssetRef> {
        lookup_image(&self.wrong_images, index)
    }

    /// Indices of `wrong_answers` that may be offered next to `correct_value`.
    pub fn wrong_candidates(&self, correct_value: usize) -> Vec<usize> {
        (0..self.wrong_answers.len())
            .filter(|&i| i != correct_value)
            .collect()
    }
}

// A short list or an empty entry both mean "no image".
fn lookup_image(images: &[Option<AssetRef>], index: usize) -> Option<&AssetRef> {
    images.get(index).and_then(Option::as_ref)
}

/// One of the two on-screen answer positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::First, Slot::Second];

    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    /// Returns `None` for anything other than 0 or 1.
    pub fn from_index(index: usize) -> Option<Slot> {
        match index {
            0 => Some(Slot::First),
            1 => Some(Slot::Second),
            _ => None,
        }
    }

    pub fn other(self) -> Slot {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

impl From<Slot> for usize {
    fn from(slot: Slot) -> usize {
        slot.index()
    }
}

impl TryFrom<usize> for Slot {
    type Error = String;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Slot::from_index(index).ok_or_else(|| format!("invalid slot index: {index}"))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Zero-based position of the player in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: usize,
    pub question: usize,
}

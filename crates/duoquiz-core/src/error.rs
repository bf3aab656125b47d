//! Content and session error types.
//!
//! Content errors are authoring mistakes in a level catalog. They are raised
//! when the catalog is built so a session never starts on invalid content.
//! Stray selection events are not errors at all; see
//! [`SelectionOutcome::Ignored`](crate::engine::SelectionOutcome::Ignored).

use thiserror::Error;

/// Which required list a content error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    Questions,
    Answers,
    CorrectSequence,
    WrongAnswers,
}

impl std::fmt::Display for ContentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentField::Questions => write!(f, "questions"),
            ContentField::Answers => write!(f, "answers"),
            ContentField::CorrectSequence => write!(f, "correct_sequence"),
            ContentField::WrongAnswers => write!(f, "wrong_answers"),
        }
    }
}

/// Errors in authored level content. None of these are recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// `questions`, `answers` and `correct_sequence` must have equal lengths.
    #[error(
        "level '{level}': {field} has {actual} entries but questions has {expected}"
    )]
    MisalignedLists {
        level: String,
        field: ContentField,
        expected: usize,
        actual: usize,
    },

    /// No wrong answer is left once the correct value is excluded.
    #[error(
        "level '{level}', question {question}: no wrong answer available \
         (pool of {pool_len}, correct value {correct_value})"
    )]
    ExhaustedPool {
        level: String,
        question: usize,
        correct_value: usize,
        pool_len: usize,
    },

    /// A required text entry is empty.
    #[error("level '{level}': {field}[{index}] is blank")]
    BlankText {
        level: String,
        field: ContentField,
        index: usize,
    },

    /// Level ids must be unique across the catalog.
    #[error("duplicate level id: {0}")]
    DuplicateLevelId(String),

    /// A lookup named a level or question the catalog does not have.
    #[error("catalog has no question {question} in level #{level}")]
    MissingQuestion { level: usize, question: usize },

    /// A level id is empty.
    #[error("level #{0} has a blank id")]
    BlankLevelId(usize),
}

/// Errors surfaced by a running [`Session`](crate::engine::Session).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The catalog produced invalid state mid-session.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// `start` was called on a session that has already started.
    #[error("session already started")]
    AlreadyStarted,
}

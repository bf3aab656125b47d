//! duoquiz-core: level catalog, answer assignment, and progression engine.
//!
//! A [`Catalog`](catalog::Catalog) of levels is loaded and validated once.
//! A [`Session`](engine::Session) then walks it question by question,
//! placing one correct and one wrong answer in two slots at random and
//! driving a [`Presenter`](presenter::Presenter) supplied by the host.

pub mod assign;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod mock;
pub mod model;
pub mod parser;
pub mod presenter;
pub mod statistics;

pub use catalog::Catalog;
pub use engine::{SelectionOutcome, Session, SessionConfig, SessionState};
pub use error::{ContentError, SessionError};
pub use presenter::{PresentationEvent, Presenter};

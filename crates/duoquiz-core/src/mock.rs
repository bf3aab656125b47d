//! Recording presenter for testing.

use crate::model::{AssetRef, Level, Slot};
use crate::presenter::{PresentationEvent, Presenter};

/// A presenter that records every call instead of drawing anything.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Vec<PresentationEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, oldest first.
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Remove and return the recorded events.
    pub fn take(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn last(&self) -> Option<&PresentationEvent> {
        self.events.last()
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&PresentationEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Presenter for RecordingPresenter {
    fn show_level_intro(&mut self, index: usize, level: &Level) {
        self.events.push(PresentationEvent::level_intro(index, level));
    }

    fn show_question(&mut self, text: &str, image: Option<&AssetRef>) {
        self.events.push(PresentationEvent::question(text, image));
    }

    fn show_answer_slot(&mut self, slot: Slot, text: &str, image: Option<&AssetRef>) {
        self.events
            .push(PresentationEvent::answer_slot(slot, text, image));
    }

    fn show_wrong_answer_reaction(&mut self, animation: Option<&AssetRef>) {
        self.events
            .push(PresentationEvent::wrong_answer_reaction(animation));
    }

    fn show_completion(&mut self) {
        self.events.push(PresentationEvent::Completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut p = RecordingPresenter::new();
        p.show_question("q", None);
        p.show_answer_slot(Slot::First, "a", Some(&AssetRef::from("a.png")));
        p.show_completion();

        assert_eq!(p.events().len(), 3);
        assert_eq!(p.last(), Some(&PresentationEvent::Completion));
        assert_eq!(
            p.count(|e| matches!(e, PresentationEvent::AnswerSlot { .. })),
            1
        );

        let taken = p.take();
        assert_eq!(taken[0], PresentationEvent::question("q", None));
        assert!(p.events().is_empty());
    }
}

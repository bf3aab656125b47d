//! Randomized assignment of one correct and one wrong answer to the two slots.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::ContentError;
use crate::model::{AssetRef, Slot};

/// What a slot shows and the value it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBinding {
    /// The correct value for the correct slot, or the wrong-pool index otherwise.
    pub value: usize,
    pub text: String,
    #[serde(default)]
    pub image: Option<AssetRef>,
}

/// The binding of both slots for a single question.
///
/// Rebuilt from scratch for every question and dropped when the next one loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    correct_slot: Slot,
    correct_value: usize,
    bindings: [SlotBinding; 2],
}

impl SlotAssignment {
    pub fn correct_slot(&self) -> Slot {
        self.correct_slot
    }

    pub fn correct_value(&self) -> usize {
        self.correct_value
    }

    pub fn binding(&self, slot: Slot) -> &SlotBinding {
        &self.bindings[slot.index()]
    }

    pub fn value_at(&self, slot: Slot) -> usize {
        self.binding(slot).value
    }

    pub fn is_correct(&self, slot: Slot) -> bool {
        self.value_at(slot) == self.correct_value
    }

    pub fn bindings(&self) -> &[SlotBinding; 2] {
        &self.bindings
    }
}

/// Bind the correct answer and one random wrong answer to the two slots.
///
/// The wrong answer is drawn uniformly from every wrong-pool index except the
/// correct value, and the correct answer lands in either slot with equal
/// probability.
pub fn assign_slots<R: Rng + ?Sized>(
    catalog: &Catalog,
    level: usize,
    question: usize,
    rng: &mut R,
) -> Result<SlotAssignment, ContentError> {
    let view = catalog
        .question(level, question)
        .ok_or(ContentError::MissingQuestion { level, question })?;

    let candidates = view.level.wrong_candidates(view.correct_value);
    let &wrong_index = candidates
        .choose(rng)
        .ok_or_else(|| ContentError::ExhaustedPool {
            level: view.level.id.clone(),
            question,
            correct_value: view.correct_value,
            pool_len: view.level.wrong_answers.len(),
        })?;

    let correct = SlotBinding {
        value: view.correct_value,
        text: view.correct_text.to_string(),
        image: view.correct_image.cloned(),
    };
    let wrong = SlotBinding {
        value: wrong_index,
        text: view.level.wrong_answers[wrong_index].clone(),
        image: view.level.wrong_image(wrong_index).cloned(),
    };

    let correct_slot = if rng.gen_bool(0.5) {
        Slot::First
    } else {
        Slot::Second
    };
    let bindings = match correct_slot {
        Slot::First => [correct, wrong],
        Slot::Second => [wrong, correct],
    };

    tracing::debug!(
        level = %view.level.id,
        question,
        correct_slot = correct_slot.index(),
        wrong_index,
        "assigned answer slots"
    );

    Ok(SlotAssignment {
        correct_slot,
        correct_value: view.correct_value,
        bindings,
    })
}

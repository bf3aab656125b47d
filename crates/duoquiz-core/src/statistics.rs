//! Balance statistics for answer assignment.
//!
//! Runs the assignment algorithm repeatedly and checks the outcomes against
//! a uniform distribution with Pearson's chi-square statistic.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assign::assign_slots;
use crate::catalog::Catalog;
use crate::error::ContentError;
use crate::model::Slot;

/// Chi-square critical value for one degree of freedom at p = 0.001.
pub const CHI_SQUARE_CRITICAL_1DF: f64 = 10.828;

/// Pearson's chi-square statistic of `counts` against a uniform expectation.
///
/// Returns 0.0 for empty input or when nothing was counted.
pub fn chi_square_uniform(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if counts.is_empty() || total == 0 {
        return 0.0;
    }
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Approximate chi-square critical value at p = 0.001 for `df` degrees of freedom.
///
/// Uses the Wilson–Hilferty approximation, which is within a few percent of
/// the exact table value for every `df >= 1`.
pub fn chi_square_critical(df: usize) -> f64 {
    if df == 0 {
        return 0.0;
    }
    if df == 1 {
        return CHI_SQUARE_CRITICAL_1DF;
    }
    // z for the upper 0.1% tail of the standard normal.
    let z = 3.090_232;
    let k = df as f64;
    let term = 1.0 - 2.0 / (9.0 * k) + z * (2.0 / (9.0 * k)).sqrt();
    k * term.powi(3)
}

/// How often each slot received the correct answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTally {
    pub counts: [u64; 2],
}

impl SlotTally {
    pub fn record(&mut self, slot: Slot) {
        self.counts[slot.index()] += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of trials where the correct answer landed in `slot`.
    pub fn share(&self, slot: Slot) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.counts[slot.index()] as f64 / total as f64
    }

    pub fn chi_square(&self) -> f64 {
        chi_square_uniform(&self.counts)
    }

    pub fn is_balanced(&self) -> bool {
        self.chi_square() < CHI_SQUARE_CRITICAL_1DF
    }
}

/// Assignment balance for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBalance {
    pub level_id: String,
    pub question: usize,
    /// Correct-slot placement.
    pub slots: SlotTally,
    /// How often each eligible wrong-pool index was offered, in index order.
    pub wrong_counts: Vec<(usize, u64)>,
}

impl QuestionBalance {
    pub fn wrong_chi_square(&self) -> f64 {
        let counts: Vec<u64> = self.wrong_counts.iter().map(|&(_, c)| c).collect();
        chi_square_uniform(&counts)
    }

    pub fn wrong_is_balanced(&self) -> bool {
        let df = self.wrong_counts.len().saturating_sub(1);
        df == 0 || self.wrong_chi_square() < chi_square_critical(df)
    }

    pub fn is_balanced(&self) -> bool {
        self.slots.is_balanced() && self.wrong_is_balanced()
    }
}

/// Run the assignment `trials` times for every question in the catalog.
pub fn audit_catalog<R: Rng + ?Sized>(
    catalog: &Catalog,
    trials: u64,
    rng: &mut R,
) -> Result<Vec<QuestionBalance>, ContentError> {
    let mut report = Vec::with_capacity(catalog.total_questions());

    for (level_index, level) in catalog.levels().iter().enumerate() {
        for (question, &correct_value) in level.correct_sequence.iter().enumerate() {
            let candidates = level.wrong_candidates(correct_value);
            let mut wrong_counts: Vec<(usize, u64)> =
                candidates.iter().map(|&i| (i, 0)).collect();
            let mut slots = SlotTally::default();

            for _ in 0..trials {
                let assignment = assign_slots(catalog, level_index, question, rng)?;
                let correct = assignment.correct_slot();
                slots.record(correct);
                let wrong_value = assignment.value_at(correct.other());
                if let Some(entry) = wrong_counts.iter_mut().find(|(i, _)| *i == wrong_value) {
                    entry.1 += 1;
                }
            }

            report.push(QuestionBalance {
                level_id: level.id.clone(),
                question,
                slots,
                wrong_counts,
            });
        }
    }

    tracing::debug!(questions = report.len(), trials, "audit finished");
    Ok(report)
}

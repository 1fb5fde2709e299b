use serde::{Deserialize, Serialize};

use crate::model::classifier::ClassifierKind;

/// Held-out accuracy of every candidate, in evaluation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationHistory {
    pub kinds: Vec<ClassifierKind>,
    pub accuracies: Vec<f64>,
}

impl EvaluationHistory {
    pub fn record(&mut self, kind: ClassifierKind, accuracy: f64) {
        self.kinds.push(kind);
        self.accuracies.push(accuracy);
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassifierKind, f64)> + '_ {
        self.kinds.iter().copied().zip(self.accuracies.iter().copied())
    }

    /// Position of the winning candidate, see [`select_best`].
    pub fn best(&self) -> Option<usize> {
        select_best(&self.accuracies)
    }
}

/// Index of the strictly highest score.
///
/// The first entry always seeds the search and a later entry only replaces the
/// current winner when it scores strictly higher, so ties resolve to the
/// earliest entry.
pub fn select_best(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

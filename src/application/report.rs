//! Summary of one build, handed to the report sink.

use serde::Serialize;

use crate::domain::{DecisionNode, LeafBuckets};

/// Outcome of building a decision tree from a card file.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub tree: DecisionNode,
    /// Labels of questions never chosen as a split, sorted
    pub unused_questions: Vec<String>,
    pub leaves: LeafBuckets,
    pub card_count: usize,
    pub catalog_size: usize,
}

impl BuildReport {
    pub fn all_questions_used(&self) -> bool {
        self.unused_questions.is_empty()
    }

    /// Cards that end in a leaf of their own.
    pub fn identified_cards(&self) -> usize {
        self.leaves.one_card
    }
}

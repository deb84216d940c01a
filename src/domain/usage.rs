//! Per-build bookkeeping: which questions were chosen and how big the leaves are.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Catalog, CatalogEntry};

/// Histogram of leaf sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafBuckets {
    #[serde(rename = "1_card")]
    pub one_card: usize,
    #[serde(rename = "2_cards")]
    pub two_cards: usize,
    #[serde(rename = "3_cards")]
    pub three_cards: usize,
    #[serde(rename = "more_than_3_cards")]
    pub more_than_three_cards: usize,
}

impl LeafBuckets {
    pub fn record(&mut self, leaf_size: usize) {
        match leaf_size {
            0 | 1 => self.one_card += 1,
            2 => self.two_cards += 1,
            3 => self.three_cards += 1,
            _ => self.more_than_three_cards += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.one_card + self.two_cards + self.three_cards + self.more_than_three_cards
    }

    /// Leaves that still hold more than one entity.
    pub fn ambiguous(&self) -> usize {
        self.total() - self.one_card
    }
}

/// Chosen-question set plus leaf histogram, scoped to one build.
#[derive(Debug, Clone)]
pub struct UsageTracker<P> {
    chosen: HashSet<P>,
    leaves: LeafBuckets,
}

impl<P> Default for UsageTracker<P> {
    fn default() -> Self {
        Self {
            chosen: HashSet::new(),
            leaves: LeafBuckets::default(),
        }
    }
}

impl<P> UsageTracker<P>
where
    P: Clone + Eq + std::hash::Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_choice(&mut self, predicate: &P) {
        if !self.chosen.contains(predicate) {
            self.chosen.insert(predicate.clone());
        }
    }

    pub fn record_leaf(&mut self, leaf_size: usize) {
        self.leaves.record(leaf_size);
    }

    pub fn was_chosen(&self, predicate: &P) -> bool {
        self.chosen.contains(predicate)
    }

    pub fn chosen_count(&self) -> usize {
        self.chosen.len()
    }

    pub fn leaves(&self) -> LeafBuckets {
        self.leaves
    }

    /// Catalog entries never picked as a split, in catalog order.
    pub fn unused<'c>(&self, catalog: &'c Catalog<P>) -> Vec<&'c CatalogEntry<P>> {
        catalog
            .iter()
            .filter(|entry| !self.chosen.contains(&entry.predicate))
            .collect()
    }

    /// Labels of unused entries, sorted and de-duplicated.
    pub fn unused_labels(&self, catalog: &Catalog<P>) -> Vec<String> {
        self.unused(catalog)
            .into_iter()
            .map(|entry| entry.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testkit::{toy_catalog, ToyQuestion};
    use rstest::rstest;

    #[rstest]
    #[case(1, LeafBuckets { one_card: 1, ..Default::default() })]
    #[case(2, LeafBuckets { two_cards: 1, ..Default::default() })]
    #[case(3, LeafBuckets { three_cards: 1, ..Default::default() })]
    #[case(4, LeafBuckets { more_than_three_cards: 1, ..Default::default() })]
    #[case(40, LeafBuckets { more_than_three_cards: 1, ..Default::default() })]
    fn given_leaf_size_when_recording_then_lands_in_bucket(
        #[case] size: usize,
        #[case] expected: LeafBuckets,
    ) {
        let mut buckets = LeafBuckets::default();
        buckets.record(size);
        assert_eq!(buckets, expected);
    }

    #[test]
    fn given_choices_when_reporting_unused_then_sorted_labels_of_the_rest() {
        let catalog = toy_catalog(&[
            (ToyQuestion::IsRed, "red?"),
            (ToyQuestion::CostIs(1), "cost 1?"),
            (ToyQuestion::Always, "always?"),
        ]);
        let mut tracker = UsageTracker::new();
        tracker.record_choice(&ToyQuestion::IsRed);
        tracker.record_choice(&ToyQuestion::IsRed);

        assert_eq!(tracker.chosen_count(), 1);
        assert!(tracker.was_chosen(&ToyQuestion::IsRed));
        assert_eq!(tracker.unused_labels(&catalog), vec!["always?", "cost 1?"]);
        assert_eq!(tracker.unused(&catalog).len(), 2);
    }

    #[test]
    fn given_buckets_when_serializing_then_uses_report_keys() {
        let buckets = LeafBuckets {
            one_card: 3,
            two_cards: 1,
            three_cards: 0,
            more_than_three_cards: 2,
        };
        let json = serde_json::to_value(buckets).unwrap();
        assert_eq!(json["1_card"], 3);
        assert_eq!(json["2_cards"], 1);
        assert_eq!(json["3_cards"], 0);
        assert_eq!(json["more_than_3_cards"], 2);
        assert_eq!(buckets.total(), 6);
        assert_eq!(buckets.ambiguous(), 3);
    }
}

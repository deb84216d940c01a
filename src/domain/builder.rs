//! Greedy decision tree construction.

use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::domain::catalog::{Catalog, CatalogEntry, Entity, Predicate};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::gain::partition;
use crate::domain::node::DecisionNode;
use crate::domain::selector::{find_optimal_question_with, ScanStrategy};
use crate::domain::usage::UsageTracker;

/// A finished tree together with the bookkeeping gathered while building it.
#[derive(Debug, Clone)]
pub struct BuildOutcome<P> {
    pub tree: DecisionNode,
    pub usage: UsageTracker<P>,
}

/// Builds decision trees over a fixed entity set and question catalog.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    strategy: ScanStrategy,
    verify_unique_names: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            strategy: ScanStrategy::Sequential,
            verify_unique_names: true,
        }
    }

    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Skip the duplicate-name check and trust the entity source.
    pub fn trust_names(mut self) -> Self {
        self.verify_unique_names = false;
        self
    }

    /// Build a tree over all `entities` starting at depth 0 with a fresh tracker.
    #[instrument(level = "debug", skip_all, fields(entities = entities.len(), questions = catalog.len()))]
    pub fn build<E, P>(&self, entities: &[E], catalog: &Catalog<P>) -> DomainResult<BuildOutcome<P>>
    where
        E: Entity,
        P: Predicate<E>,
    {
        if entities.is_empty() {
            return Err(DomainError::EmptyEntitySet);
        }
        if self.verify_unique_names {
            ensure_unique_names(entities)?;
        }

        let subset: Vec<&E> = entities.iter().collect();
        let questions: Vec<&CatalogEntry<P>> = catalog.iter().collect();
        let mut usage = UsageTracker::new();

        let tree = build_tree(&subset, &questions, 0, &mut usage, self.strategy);
        debug!(
            leaves = tree.leaf_count(),
            max_depth = tree.max_depth(),
            chosen = usage.chosen_count(),
            "tree built"
        );
        Ok(BuildOutcome { tree, usage })
    }
}

fn ensure_unique_names<E: Entity>(entities: &[E]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(entities.len());
    for entity in entities {
        if !seen.insert(entity.name()) {
            return Err(DomainError::DuplicateName(entity.name().to_string()));
        }
    }
    Ok(())
}

/// Recursively split `subset` until every leaf names one entity or nothing separates it.
///
/// `subset` must be non-empty. The chosen question is dropped from the catalog handed to
/// both children, so no question repeats along a root-to-leaf path.
pub fn build_tree<E, P>(
    subset: &[&E],
    catalog: &[&CatalogEntry<P>],
    depth: usize,
    usage: &mut UsageTracker<P>,
    strategy: ScanStrategy,
) -> DecisionNode
where
    E: Entity,
    P: Predicate<E>,
{
    debug_assert!(!subset.is_empty(), "build_tree called on an empty subset");

    if let [only] = subset {
        usage.record_leaf(1);
        trace!(depth, card = only.name(), "singleton leaf");
        return DecisionNode::Card {
            card_name: only.name().to_string(),
            depth,
        };
    }

    let best = find_optimal_question_with(subset, catalog, strategy);
    let chosen = match best.entry {
        Some(entry) if !catalog.is_empty() && best.gain > 0.0 => entry,
        _ => {
            usage.record_leaf(subset.len());
            trace!(depth, size = subset.len(), "ambiguous leaf");
            return DecisionNode::Ambiguous {
                remaining: subset.iter().map(|e| e.name().to_string()).collect(),
                depth,
            };
        }
    };

    usage.record_choice(&chosen.predicate);
    let next_catalog: Vec<&CatalogEntry<P>> = catalog
        .iter()
        .copied()
        .filter(|entry| entry.predicate != chosen.predicate)
        .collect();

    let split = partition(subset, &chosen.predicate);
    trace!(
        depth,
        question = %chosen.label,
        gain = best.gain,
        yes = split.yes.len(),
        no = split.no.len(),
        "split"
    );

    let yes = build_tree(&split.yes, &next_catalog, depth + 1, usage, strategy);
    let no = build_tree(&split.no, &next_catalog, depth + 1, usage, strategy);

    DecisionNode::Split {
        question: chosen.label.clone(),
        depth,
        yes: Box::new(yes),
        no: Box::new(no),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testkit::{toy_catalog, toy_deck, ToyCard, ToyQuestion};
    use crate::domain::usage::LeafBuckets;

    fn scenario_catalog() -> Catalog<ToyQuestion> {
        toy_catalog(&[
            (ToyQuestion::IsRed, "red?"),
            (ToyQuestion::CostBelow(2), "cost<2?"),
        ])
    }

    #[test]
    fn given_three_cards_when_building_then_splits_red_first() {
        let outcome = TreeBuilder::new()
            .build(&toy_deck(), &scenario_catalog())
            .unwrap();

        let expected = DecisionNode::Split {
            question: "red?".into(),
            depth: 0,
            yes: Box::new(DecisionNode::Split {
                question: "cost<2?".into(),
                depth: 1,
                yes: Box::new(DecisionNode::Card {
                    card_name: "A".into(),
                    depth: 2,
                }),
                no: Box::new(DecisionNode::Card {
                    card_name: "B".into(),
                    depth: 2,
                }),
            }),
            no: Box::new(DecisionNode::Card {
                card_name: "C".into(),
                depth: 1,
            }),
        };
        assert_eq!(outcome.tree, expected);
        assert_eq!(
            outcome.usage.leaves(),
            LeafBuckets {
                one_card: 3,
                ..Default::default()
            }
        );
        assert!(outcome.usage.unused_labels(&scenario_catalog()).is_empty());
    }

    #[test]
    fn given_only_constant_questions_when_building_then_single_ambiguous_root() {
        let catalog = toy_catalog(&[
            (ToyQuestion::Always, "always?"),
            (ToyQuestion::Never, "never?"),
        ]);
        let outcome = TreeBuilder::new().build(&toy_deck(), &catalog).unwrap();

        assert_eq!(
            outcome.tree,
            DecisionNode::Ambiguous {
                remaining: vec!["A".into(), "B".into(), "C".into()],
                depth: 0,
            }
        );
        assert_eq!(outcome.usage.leaves().three_cards, 1);
        assert_eq!(
            outcome.usage.unused_labels(&catalog),
            vec!["always?", "never?"]
        );
    }

    #[test]
    fn given_empty_catalog_when_building_then_ambiguous_root() {
        let catalog: Catalog<ToyQuestion> = Catalog::new();
        let outcome = TreeBuilder::new().build(&toy_deck(), &catalog).unwrap();
        assert!(outcome.tree.is_leaf());
        assert_eq!(outcome.tree.leaf_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn given_single_card_when_building_then_singleton_root() {
        let deck = vec![ToyCard::new("Solo", true, 1)];
        let outcome = TreeBuilder::new()
            .build(&deck, &scenario_catalog())
            .unwrap();
        assert_eq!(
            outcome.tree,
            DecisionNode::Card {
                card_name: "Solo".into(),
                depth: 0
            }
        );
        assert_eq!(outcome.usage.chosen_count(), 0);
    }

    #[test]
    fn given_empty_deck_when_building_then_rejects() {
        let deck: Vec<ToyCard> = Vec::new();
        let err = TreeBuilder::new()
            .build(&deck, &scenario_catalog())
            .unwrap_err();
        assert_eq!(err, DomainError::EmptyEntitySet);
    }

    #[test]
    fn given_duplicate_names_when_building_then_rejects_unless_trusted() {
        let deck = vec![ToyCard::new("A", true, 1), ToyCard::new("A", false, 2)];

        let err = TreeBuilder::new()
            .build(&deck, &scenario_catalog())
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateName("A".into()));

        let outcome = TreeBuilder::new()
            .trust_names()
            .build(&deck, &scenario_catalog())
            .unwrap();
        assert_eq!(outcome.tree.leaf_count(), 2);
    }

    #[test]
    fn given_inseparable_pair_when_building_then_ambiguous_leaf_keeps_input_order() {
        let deck = vec![
            ToyCard::new("Z", true, 1),
            ToyCard::new("Y", true, 1),
            ToyCard::new("X", false, 1),
        ];
        let outcome = TreeBuilder::new()
            .build(&deck, &scenario_catalog())
            .unwrap();

        match &outcome.tree {
            DecisionNode::Split { yes, .. } => assert_eq!(
                **yes,
                DecisionNode::Ambiguous {
                    remaining: vec!["Z".into(), "Y".into()],
                    depth: 1,
                }
            ),
            other => panic!("expected split root, got {other:?}"),
        }
        assert_eq!(outcome.usage.leaves().two_cards, 1);
        assert_eq!(outcome.usage.leaves().one_card, 1);
        assert_eq!(outcome.usage.unused_labels(&scenario_catalog()), vec!["cost<2?"]);
    }

    #[test]
    fn given_parallel_strategy_when_building_then_same_tree() {
        let deck: Vec<ToyCard> = (0..24)
            .map(|i| ToyCard::new(&format!("card-{i}"), i % 3 == 0, i % 7))
            .collect();
        let catalog = toy_catalog(&[
            (ToyQuestion::IsRed, "red?"),
            (ToyQuestion::CostBelow(2), "cost<2?"),
            (ToyQuestion::CostBelow(4), "cost<4?"),
            (ToyQuestion::CostIs(0), "cost 0?"),
            (ToyQuestion::CostIs(3), "cost 3?"),
            (ToyQuestion::CostIs(5), "cost 5?"),
        ]);

        let sequential = TreeBuilder::new().build(&deck, &catalog).unwrap();
        let parallel = TreeBuilder::new()
            .with_strategy(ScanStrategy::Parallel)
            .build(&deck, &catalog)
            .unwrap();
        assert_eq!(sequential.tree, parallel.tree);
        assert_eq!(sequential.usage.leaves(), parallel.usage.leaves());
    }
}

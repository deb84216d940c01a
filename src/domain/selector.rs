//! Optimal-question search over the remaining catalog.

use rayon::prelude::*;

use crate::domain::catalog::{CatalogEntry, Entity, Predicate};
use crate::domain::gain::split_gain;

/// Gain reported when no catalog entry splits the subset.
pub const NO_SPLIT_GAIN: f64 = -1.0;

/// How candidate questions are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanStrategy {
    #[default]
    Sequential,
    /// Score entries on the rayon pool; the winner is still picked in catalog order.
    Parallel,
}

/// Best question for a subset, or `None` with [`NO_SPLIT_GAIN`].
#[derive(Debug)]
pub struct OptimalQuestion<'c, P> {
    pub entry: Option<&'c CatalogEntry<P>>,
    pub gain: f64,
}

impl<P> OptimalQuestion<'_, P> {
    fn none() -> Self {
        Self {
            entry: None,
            gain: NO_SPLIT_GAIN,
        }
    }
}

/// Gain of one entry, `None` if either side of its split would be empty.
fn score<E, P>(subset: &[&E], predicate: &P) -> Option<f64>
where
    P: Predicate<E>,
{
    let yes = subset.iter().filter(|e| predicate.test(e)).count();
    let no = subset.len() - yes;
    if yes == 0 || no == 0 {
        return None;
    }
    Some(split_gain(subset.len(), yes, no))
}

/// First-strict-improvement scan: ties keep the earlier entry.
fn pick_best<'c, P>(
    catalog: &[&'c CatalogEntry<P>],
    scores: impl IntoIterator<Item = Option<f64>>,
) -> OptimalQuestion<'c, P> {
    let mut best = OptimalQuestion::none();
    for (entry, gain) in catalog.iter().zip(scores) {
        let Some(gain) = gain else { continue };
        if gain > best.gain {
            best = OptimalQuestion {
                entry: Some(*entry),
                gain,
            };
        }
    }
    best
}

pub fn find_optimal_question<'c, E, P>(
    subset: &[&E],
    catalog: &[&'c CatalogEntry<P>],
) -> OptimalQuestion<'c, P>
where
    E: Entity,
    P: Predicate<E>,
{
    find_optimal_question_with(subset, catalog, ScanStrategy::Sequential)
}

pub fn find_optimal_question_with<'c, E, P>(
    subset: &[&E],
    catalog: &[&'c CatalogEntry<P>],
    strategy: ScanStrategy,
) -> OptimalQuestion<'c, P>
where
    E: Entity,
    P: Predicate<E>,
{
    match strategy {
        ScanStrategy::Sequential => pick_best(
            catalog,
            catalog.iter().map(|entry| score(subset, &entry.predicate)),
        ),
        ScanStrategy::Parallel => {
            let scores: Vec<Option<f64>> = catalog
                .par_iter()
                .map(|entry| score(subset, &entry.predicate))
                .collect();
            pick_best(catalog, scores)
        }
    }
}

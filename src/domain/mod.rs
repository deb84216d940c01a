//! Domain layer: entropy, question selection and tree construction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod card;
pub mod catalog;
pub mod error;
pub mod gain;
pub mod node;
pub mod question;
pub mod selector;
pub mod usage;

#[cfg(test)]
pub(crate) mod testkit;

pub use builder::{build_tree, BuildOutcome, TreeBuilder};
pub use card::{Card, Color, Stat};
pub use catalog::{Catalog, CatalogEntry, Entity, Predicate};
pub use error::{DomainError, DomainResult};
pub use gain::{entropy, information_gain, partition, Partition};
pub use node::DecisionNode;
pub use question::Question;
pub use selector::{find_optimal_question, find_optimal_question_with, OptimalQuestion, ScanStrategy};
pub use usage::{LeafBuckets, UsageTracker};

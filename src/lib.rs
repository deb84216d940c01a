//! Greedy information-gain decision trees over uniquely named cards.
//!
//! The [`domain`] layer holds the tree construction engine and is generic over any
//! [`domain::Entity`] and [`domain::Predicate`]; the card data model, question catalog,
//! configuration and CLI sit around it.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

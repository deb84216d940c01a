//! Small deck used by the domain unit tests.

use crate::domain::catalog::{Catalog, CatalogEntry, Entity, Predicate};

#[derive(Debug, Clone)]
pub struct ToyCard {
    pub name: String,
    pub red: bool,
    pub cost: u32,
}

impl ToyCard {
    pub fn new(name: &str, red: bool, cost: u32) -> Self {
        Self {
            name: name.to_string(),
            red,
            cost,
        }
    }
}

impl Entity for ToyCard {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToyQuestion {
    IsRed,
    CostBelow(u32),
    CostIs(u32),
    Always,
    Never,
}

impl Predicate<ToyCard> for ToyQuestion {
    fn test(&self, card: &ToyCard) -> bool {
        match self {
            Self::IsRed => card.red,
            Self::CostBelow(n) => card.cost < *n,
            Self::CostIs(n) => card.cost == *n,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// A {red, 1}, B {red, 2}, C {blue, 1}.
pub fn toy_deck() -> Vec<ToyCard> {
    vec![
        ToyCard::new("A", true, 1),
        ToyCard::new("B", true, 2),
        ToyCard::new("C", false, 1),
    ]
}

pub fn toy_catalog(questions: &[(ToyQuestion, &str)]) -> Catalog<ToyQuestion> {
    questions
        .iter()
        .map(|(q, label)| CatalogEntry::new(q.clone(), *label))
        .collect()
}

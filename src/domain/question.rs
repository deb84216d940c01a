//! Card questions as plain data records interpreted by one evaluator.

use std::fmt;

use crate::domain::card::{Card, Color, Stat};
use crate::domain::catalog::{CatalogEntry, Predicate};

/// A yes/no question about a card.
///
/// Every variant answers `false` when the field it reads is absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Question {
    ColorIdentity(Color),
    Colorless,
    Legendary,
    CmcEquals(u32),
    CmcBelow(u32),
    CmcAtLeast(u32),
    StatEquals(Stat, u32),
    StatBelow(Stat, u32),
    StatAtLeast(Stat, u32),
    HasType(String),
    HasKeyword(String),
}

impl Question {
    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn into_entry(self) -> CatalogEntry<Self> {
        let label = self.label();
        CatalogEntry::new(self, label)
    }
}

impl Predicate<Card> for Question {
    fn test(&self, card: &Card) -> bool {
        match self {
            Self::ColorIdentity(color) => card.has_color_identity(*color),
            Self::Colorless => card.is_colorless(),
            Self::Legendary => card.type_line_contains("Legendary"),
            Self::CmcEquals(n) => card.cmc().is_some_and(|cmc| cmc == f64::from(*n)),
            Self::CmcBelow(n) => card.cmc().is_some_and(|cmc| cmc < f64::from(*n)),
            Self::CmcAtLeast(n) => card.cmc().is_some_and(|cmc| cmc >= f64::from(*n)),
            Self::StatEquals(stat, n) => card.stat(*stat) == Some(*n),
            Self::StatBelow(stat, n) => card.stat(*stat).is_some_and(|v| v < *n),
            Self::StatAtLeast(stat, n) => card.stat(*stat).is_some_and(|v| v >= *n),
            Self::HasType(token) => card.type_line_contains(token),
            Self::HasKeyword(keyword) => card.has_keyword(keyword),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CMC: &str = "converted mana value (CMC)";
        match self {
            Self::ColorIdentity(color) => write!(
                f,
                "Does the card have {} in its color identity?",
                color.name()
            ),
            Self::Colorless => write!(f, "Is the card Colorless?"),
            Self::Legendary => write!(f, "Is the card Legendary?"),
            Self::CmcEquals(n) => write!(f, "Does the card have a {CMC} of {n}?"),
            Self::CmcBelow(n) => write!(f, "Does the card have a {CMC} less than {n}?"),
            Self::CmcAtLeast(n) => write!(f, "Does the card have a {CMC} of {n} or more?"),
            Self::StatEquals(stat, n) => write!(f, "Is it a creature with {} {n}?", stat.name()),
            Self::StatBelow(stat, n) => {
                write!(f, "Is it a creature with {} less than {n}?", stat.name())
            }
            Self::StatAtLeast(stat, n) => {
                write!(f, "Is it a creature with {} {n} or greater?", stat.name())
            }
            Self::HasType(token) => write!(f, "Is the card a {token}?"),
            Self::HasKeyword(keyword) => write!(f, "Does the card have the {keyword} keyword?"),
        }
    }
}

//! Card records as supplied by the card data file.
//!
//! Only the fields the question catalog looks at are kept; everything else in the
//! source JSON is ignored. Each accessor documents the neutral value it falls back to.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::catalog::Entity;

/// Colour of mana, identified by its single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    pub fn code(self) -> &'static str {
        match self {
            Self::White => "W",
            Self::Blue => "U",
            Self::Black => "B",
            Self::Red => "R",
            Self::Green => "G",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Blue => "Blue",
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Green => "Green",
        }
    }
}

/// Creature statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Power,
    Toughness,
}

impl Stat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Toughness => "toughness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color_identity: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub type_line: String,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub power: Option<Value>,
    #[serde(default)]
    pub toughness: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Card {
    /// Card with only a name; every other field takes its neutral value.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_identity: Vec::new(),
            colors: Vec::new(),
            type_line: String::new(),
            cmc: None,
            power: None,
            toughness: None,
            keywords: Vec::new(),
        }
    }

    /// Absent colour identity counts as empty.
    pub fn has_color_identity(&self, color: Color) -> bool {
        self.color_identity.iter().any(|c| c == color.code())
    }

    /// No colours and not a land. Absent `colors` counts as no colours.
    pub fn is_colorless(&self) -> bool {
        self.colors.is_empty() && !self.type_line.contains("Land")
    }

    /// Substring test against the type line; absent type line is `""`.
    pub fn type_line_contains(&self, token: &str) -> bool {
        self.type_line.contains(token)
    }

    pub fn is_creature(&self) -> bool {
        self.type_line_contains("Creature")
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    /// Converted mana cost, `None` when absent.
    pub fn cmc(&self) -> Option<f64> {
        self.cmc
    }

    /// Numeric power or toughness.
    ///
    /// `None` unless the card is a creature and the value is a plain non-negative integer,
    /// either as a number or as an all-digit string (`"*"` and `"1+*"` are not numeric).
    pub fn stat(&self, stat: Stat) -> Option<u32> {
        if !self.is_creature() {
            return None;
        }
        let raw = match stat {
            Stat::Power => self.power.as_ref(),
            Stat::Toughness => self.toughness.as_ref(),
        }?;
        match raw {
            Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse().ok()
            }
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            _ => None,
        }
    }

    /// Distinct tokens of the type line, with the supertype/subtype dash removed.
    pub fn type_tokens(&self) -> Vec<String> {
        self.type_line
            .replace(" — ", " ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl Entity for Card {
    fn name(&self) -> &str {
        &self.name
    }
}

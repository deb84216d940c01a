//! Question catalog generation
//!
//! Fixed questions first, then numeric questions from the configured ranges, then
//! questions mined from the card data. The order is stable for a given card set,
//! which keeps tie-breaking reproducible.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::config::CatalogConfig;
use crate::domain::{Card, Catalog, Color, Question, Stat};

/// Colour identity questions in asking order.
const COLOR_ORDER: [Color; 5] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Black,
    Color::White,
];

/// Generates the question catalog for a set of cards.
pub struct CatalogService {
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    #[instrument(level = "debug", skip_all, fields(cards = cards.len()))]
    pub fn generate(&self, cards: &[Card]) -> Catalog<Question> {
        let mut catalog = Catalog::new();

        catalog.extend(Self::fixed_questions().map(Question::into_entry));
        catalog.extend(self.cmc_questions().map(Question::into_entry));
        for stat in [Stat::Power, Stat::Toughness] {
            catalog.extend(self.stat_questions(stat).map(Question::into_entry));
        }
        let fixed = catalog.len();

        if self.config.type_questions {
            catalog.extend(type_questions(cards).map(Question::into_entry));
        }
        if self.config.keyword_questions {
            catalog.extend(keyword_questions(cards).map(Question::into_entry));
        }

        debug!(
            fixed,
            mined = catalog.len() - fixed,
            "generated question catalog"
        );
        catalog
    }

    fn fixed_questions() -> impl Iterator<Item = Question> {
        COLOR_ORDER
            .into_iter()
            .map(Question::ColorIdentity)
            .chain([Question::Colorless, Question::Legendary])
    }

    fn cmc_questions(&self) -> impl Iterator<Item = Question> + '_ {
        (0..=self.config.exact_max)
            .map(Question::CmcEquals)
            .chain(self.config.cmc_below.iter().copied().map(Question::CmcBelow))
            .chain(
                self.config
                    .cmc_at_least
                    .iter()
                    .copied()
                    .map(Question::CmcAtLeast),
            )
    }

    fn stat_questions(&self, stat: Stat) -> impl Iterator<Item = Question> + '_ {
        (0..=self.config.exact_max)
            .map(move |n| Question::StatEquals(stat, n))
            .chain(
                self.config
                    .stat_below
                    .iter()
                    .map(move |&n| Question::StatBelow(stat, n)),
            )
            .chain(
                self.config
                    .stat_at_least
                    .iter()
                    .map(move |&n| Question::StatAtLeast(stat, n)),
            )
    }
}

/// One question per distinct type-line token, sorted.
fn type_questions(cards: &[Card]) -> impl Iterator<Item = Question> {
    cards
        .iter()
        .flat_map(Card::type_tokens)
        .sorted()
        .dedup()
        .map(Question::HasType)
}

/// One question per distinct non-empty keyword, sorted.
fn keyword_questions(cards: &[Card]) -> impl Iterator<Item = Question> + '_ {
    cards
        .iter()
        .flat_map(|card| card.keywords.iter())
        .filter(|keyword| !keyword.is_empty())
        .sorted()
        .dedup()
        .cloned()
        .map(Question::HasKeyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cards() -> Vec<Card> {
        serde_json::from_value(json!([
            {"name": "Llanowar Elves", "type_line": "Creature — Elf Druid", "keywords": []},
            {"name": "Serra Angel", "type_line": "Creature — Angel", "keywords": ["Flying", "Vigilance"]},
            {"name": "Birds of Paradise", "type_line": "Creature — Bird", "keywords": ["Flying", ""]},
        ]))
        .unwrap()
    }

    #[test]
    fn given_default_config_when_generating_then_fixed_block_comes_first() {
        let catalog = CatalogService::new(CatalogConfig::default()).generate(&[]);
        let labels: Vec<_> = catalog.labels().collect();

        assert_eq!(labels[0], "Does the card have Red in its color identity?");
        assert_eq!(labels[4], "Does the card have White in its color identity?");
        assert_eq!(labels[5], "Is the card Colorless?");
        assert_eq!(labels[6], "Is the card Legendary?");
        assert_eq!(
            labels[7],
            "Does the card have a converted mana value (CMC) of 0?"
        );
        // 7 fixed + (14 + 3 + 4) CMC + 2 * (14 + 1 + 2) stats
        assert_eq!(catalog.len(), 7 + 21 + 34);
    }

    #[test]
    fn given_cards_when_generating_then_mines_sorted_types_and_keywords() {
        let catalog = CatalogService::new(CatalogConfig::default()).generate(&cards());
        let mined: Vec<_> = catalog.iter().skip(62).map(|e| e.predicate.clone()).collect();

        assert_eq!(
            mined,
            vec![
                Question::HasType("Angel".into()),
                Question::HasType("Bird".into()),
                Question::HasType("Creature".into()),
                Question::HasType("Druid".into()),
                Question::HasType("Elf".into()),
                Question::HasKeyword("Flying".into()),
                Question::HasKeyword("Vigilance".into()),
            ]
        );
    }

    #[test]
    fn given_mining_disabled_when_generating_then_only_fixed_and_numeric() {
        let config = CatalogConfig {
            exact_max: 2,
            cmc_below: vec![],
            cmc_at_least: vec![],
            stat_below: vec![],
            stat_at_least: vec![],
            type_questions: false,
            keyword_questions: false,
        };
        let catalog = CatalogService::new(config).generate(&cards());
        assert_eq!(catalog.len(), 7 + 3 + 2 * 3);
    }

    #[test]
    fn given_repeated_thresholds_when_generating_then_deduplicated() {
        let config = CatalogConfig {
            cmc_below: vec![3, 3],
            ..CatalogConfig::default()
        };
        let catalog = CatalogService::new(config).generate(&[]);
        assert_eq!(catalog.len(), 62);
    }

    #[test]
    fn given_same_cards_when_generating_twice_then_identical_order() {
        let service = CatalogService::new(CatalogConfig::default());
        assert_eq!(service.generate(&cards()), service.generate(&cards()));
    }
}

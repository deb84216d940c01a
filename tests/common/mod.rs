//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

use cardtree::domain::Card;

pub fn card(value: Value) -> Card {
    serde_json::from_value(value).expect("valid card json")
}

/// A small but varied deck.
pub fn sample_cards_json() -> Value {
    json!([
        {"name": "Lightning Bolt", "color_identity": ["R"], "colors": ["R"], "type_line": "Instant", "cmc": 1.0},
        {"name": "Goblin Guide", "color_identity": ["R"], "colors": ["R"], "type_line": "Creature — Goblin Scout", "cmc": 1.0, "power": "2", "toughness": "2", "keywords": ["Haste"]},
        {"name": "Counterspell", "color_identity": ["U"], "colors": ["U"], "type_line": "Instant", "cmc": 2.0},
        {"name": "Serra Angel", "color_identity": ["W"], "colors": ["W"], "type_line": "Creature — Angel", "cmc": 5.0, "power": "4", "toughness": "4", "keywords": ["Flying", "Vigilance"]},
        {"name": "Llanowar Elves", "color_identity": ["G"], "colors": ["G"], "type_line": "Creature — Elf Druid", "cmc": 1.0, "power": "1", "toughness": "1"},
        {"name": "Sol Ring", "color_identity": [], "colors": [], "type_line": "Artifact", "cmc": 1.0},
        {"name": "Island", "color_identity": ["U"], "colors": [], "type_line": "Basic Land — Island", "cmc": 0.0},
        {"name": "Swamp", "color_identity": ["B"], "colors": [], "type_line": "Basic Land — Swamp", "cmc": 0.0},
        {"name": "Tarmogoyf", "color_identity": ["G"], "colors": ["G"], "type_line": "Creature — Lhurgoyf", "cmc": 2.0, "power": "*", "toughness": "1+*"},
        {"name": "Karn Liberated", "color_identity": [], "colors": [], "type_line": "Legendary Planeswalker — Karn", "cmc": 7.0},
        {"name": "Emrakul, the Aeons Torn", "color_identity": [], "colors": [], "type_line": "Legendary Creature — Eldrazi", "cmc": 15.0, "power": "15", "toughness": "15", "keywords": ["Flying", "Annihilator"]},
        {"name": "Dark Ritual", "color_identity": ["B"], "colors": ["B"], "type_line": "Instant", "cmc": 1.0}
    ])
}

pub fn sample_cards() -> Vec<Card> {
    serde_json::from_value(sample_cards_json()).expect("valid sample deck")
}

pub fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).expect("write fixture");
    path
}

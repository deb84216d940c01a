//! Decision tree nodes and their on-disk JSON shape.

use serde::{Deserialize, Serialize};

/// One node of a built decision tree.
///
/// Serializes untagged so split nodes read `{question, depth, yes, no}`, singleton
/// leaves `{card_name, depth}` and ambiguous leaves `{remainingPossibleCardNames, depth}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionNode {
    Split {
        question: String,
        depth: usize,
        yes: Box<DecisionNode>,
        no: Box<DecisionNode>,
    },
    Card {
        card_name: String,
        depth: usize,
    },
    Ambiguous {
        #[serde(rename = "remainingPossibleCardNames")]
        remaining: Vec<String>,
        depth: usize,
    },
}

impl DecisionNode {
    pub fn depth(&self) -> usize {
        match self {
            Self::Split { depth, .. } | Self::Card { depth, .. } | Self::Ambiguous { depth, .. } => {
                *depth
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Self::Split { .. })
    }

    /// Names held by all leaves below this node, left (yes) to right (no).
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_leaf_names(&mut names);
        names
    }

    fn collect_leaf_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Split { yes, no, .. } => {
                yes.collect_leaf_names(names);
                no.collect_leaf_names(names);
            }
            Self::Card { card_name, .. } => names.push(card_name),
            Self::Ambiguous { remaining, .. } => names.extend(remaining.iter().map(String::as_str)),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Split { yes, no, .. } => yes.leaf_count() + no.leaf_count(),
            _ => 1,
        }
    }

    /// Deepest leaf depth.
    pub fn max_depth(&self) -> usize {
        match self {
            Self::Split { yes, no, .. } => yes.max_depth().max(no.max_depth()),
            leaf => leaf.depth(),
        }
    }

    /// Question labels along every root-to-leaf path, one `Vec` per leaf.
    pub fn question_paths(&self) -> Vec<Vec<&str>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        self.collect_paths(&mut current, &mut paths);
        paths
    }

    fn collect_paths<'a>(&'a self, current: &mut Vec<&'a str>, paths: &mut Vec<Vec<&'a str>>) {
        match self {
            Self::Split {
                question, yes, no, ..
            } => {
                current.push(question);
                yes.collect_paths(current, paths);
                no.collect_paths(current, paths);
                current.pop();
            }
            _ => paths.push(current.clone()),
        }
    }
}

//! Decision tree use case
//!
//! Loads card data, runs the tree builder and persists the resulting tree.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, BuildReport, IoResultExt};
use crate::config::BuildConfig;
use crate::domain::{Card, Catalog, DecisionNode, Question, ScanStrategy, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Service for building and persisting card decision trees.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
    config: BuildConfig,
}

impl TreeService {
    pub fn new(fs: Arc<dyn FileSystem>, config: BuildConfig) -> Self {
        Self { fs, config }
    }

    /// Read a JSON array of cards.
    #[instrument(level = "debug", skip(self))]
    pub fn load_cards(&self, path: &Path) -> ApplicationResult<Vec<Card>> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::CardDataNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read card data", path)?;
        let cards: Vec<Card> =
            serde_json::from_str(&content).map_err(|e| ApplicationError::InvalidCardData {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!("load_cards: {} cards", cards.len());
        Ok(cards)
    }

    /// Build the tree and collect the usage summary.
    #[instrument(level = "debug", skip_all, fields(cards = cards.len(), questions = catalog.len()))]
    pub fn build(&self, cards: &[Card], catalog: &Catalog<Question>) -> ApplicationResult<BuildReport> {
        let strategy = if self.config.parallel {
            ScanStrategy::Parallel
        } else {
            ScanStrategy::Sequential
        };
        let mut builder = TreeBuilder::new().with_strategy(strategy);
        if !self.config.verify_unique_names {
            builder = builder.trust_names();
        }

        let outcome = builder.build(cards, catalog)?;
        let report = BuildReport {
            unused_questions: outcome.usage.unused_labels(catalog),
            leaves: outcome.usage.leaves(),
            card_count: cards.len(),
            catalog_size: catalog.len(),
            tree: outcome.tree,
        };
        info!(
            leaves = report.leaves.total(),
            identified = report.identified_cards(),
            unused = report.unused_questions.len(),
            "built decision tree"
        );
        Ok(report)
    }

    /// Write the tree as JSON indented by four spaces, creating parent directories.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn write_tree(&self, tree: &DecisionNode, path: &Path) -> ApplicationResult<()> {
        let json = to_pretty_json(tree).with_path_context("serialize decision tree", path)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create output directory", path)?;
        self.fs
            .write(path, &json)
            .with_path_context("write decision tree", path)?;
        debug!("write_tree: {} bytes", json.len());
        Ok(())
    }

    /// Read a tree previously written by [`TreeService::write_tree`].
    #[instrument(level = "debug", skip(self))]
    pub fn load_tree(&self, path: &Path) -> ApplicationResult<DecisionNode> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read decision tree", path)?;
        serde_json::from_str(&content).map_err(|e| ApplicationError::InvalidTree {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tree_when_rendering_json_then_four_space_indent() {
        let tree = DecisionNode::Card {
            card_name: "Island".into(),
            depth: 0,
        };
        let json = to_pretty_json(&tree).unwrap();
        assert_eq!(json, "{\n    \"card_name\": \"Island\",\n    \"depth\": 0\n}");
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/cardtree/cardtree.toml`
//! 3. Local config: `<project_dir>/.cardtree.toml`
//! 4. Environment variables: `CARDTREE__*` prefix (e.g. `CARDTREE__BUILD__PARALLEL=true`)
//!
//! Later layers replace earlier values, arrays included.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Which questions the catalog generator emits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Largest value for the exact CMC, power and toughness questions (from 0)
    pub exact_max: u32,
    /// Thresholds for "CMC less than N"
    pub cmc_below: Vec<u32>,
    /// Thresholds for "CMC of N or more"
    pub cmc_at_least: Vec<u32>,
    /// Thresholds for "power/toughness less than N"
    pub stat_below: Vec<u32>,
    /// Thresholds for "power/toughness N or greater"
    pub stat_at_least: Vec<u32>,
    /// Mine one question per distinct type-line token
    pub type_questions: bool,
    /// Mine one question per distinct keyword
    pub keyword_questions: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            exact_max: 13,
            cmc_below: vec![3, 5, 7],
            cmc_at_least: vec![3, 5, 7, 10],
            stat_below: vec![3],
            stat_at_least: vec![4, 7],
            type_questions: true,
            keyword_questions: true,
        }
    }
}

/// Tree construction switches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    /// Reject card data containing two cards with the same name
    pub verify_unique_names: bool,
    /// Score candidate questions on all cores
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            verify_unique_names: true,
            parallel: false,
        }
    }
}

/// Raw catalog config for intermediate parsing (`None` → inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCatalogConfig {
    pub exact_max: Option<u32>,
    pub cmc_below: Option<Vec<u32>>,
    pub cmc_at_least: Option<Vec<u32>>,
    pub stat_below: Option<Vec<u32>>,
    pub stat_at_least: Option<Vec<u32>>,
    pub type_questions: Option<bool>,
    pub keyword_questions: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBuildConfig {
    pub verify_unique_names: Option<bool>,
    pub parallel: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub cards_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub catalog: RawCatalogConfig,
    pub build: RawBuildConfig,
}

impl CatalogConfig {
    fn merge(&self, overlay: &RawCatalogConfig) -> Self {
        Self {
            exact_max: overlay.exact_max.unwrap_or(self.exact_max),
            cmc_below: overlay
                .cmc_below
                .clone()
                .unwrap_or_else(|| self.cmc_below.clone()),
            cmc_at_least: overlay
                .cmc_at_least
                .clone()
                .unwrap_or_else(|| self.cmc_at_least.clone()),
            stat_below: overlay
                .stat_below
                .clone()
                .unwrap_or_else(|| self.stat_below.clone()),
            stat_at_least: overlay
                .stat_at_least
                .clone()
                .unwrap_or_else(|| self.stat_at_least.clone()),
            type_questions: overlay.type_questions.unwrap_or(self.type_questions),
            keyword_questions: overlay.keyword_questions.unwrap_or(self.keyword_questions),
        }
    }
}

impl BuildConfig {
    fn merge(&self, overlay: &RawBuildConfig) -> Self {
        Self {
            verify_unique_names: overlay
                .verify_unique_names
                .unwrap_or(self.verify_unique_names),
            parallel: overlay.parallel.unwrap_or(self.parallel),
        }
    }
}

/// Unified configuration for cardtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Card data (JSON array of cards)
    pub cards_file: PathBuf,
    /// Where the decision tree is written
    pub output_file: PathBuf,
    /// Question catalog generation
    pub catalog: CatalogConfig,
    /// Tree construction
    pub build: BuildConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cards_file: PathBuf::from("card-data.json"),
            output_file: PathBuf::from("decision-tree.json"),
            catalog: CatalogConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

/// Get the XDG config directory for cardtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cardtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("cardtree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".cardtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the path untouched.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    fn expand_paths(&mut self) {
        self.cards_file = expand_path(&self.cards_file);
        self.output_file = expand_path(&self.output_file);
    }

    /// Relative file paths resolve against the project directory.
    fn anchor_paths(&mut self, project_dir: &Path) {
        if self.cards_file.is_relative() {
            self.cards_file = project_dir.join(&self.cards_file);
        }
        if self.output_file.is_relative() {
            self.output_file = project_dir.join(&self.output_file);
        }
    }

    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            cards_file: overlay
                .cards_file
                .clone()
                .unwrap_or_else(|| self.cards_file.clone()),
            output_file: overlay
                .output_file
                .clone()
                .unwrap_or_else(|| self.output_file.clone()),
            catalog: self.catalog.merge(&overlay.catalog),
            build: self.build.merge(&overlay.build),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Directory holding `.cardtree.toml`; relative file paths
    ///   in the result are anchored here
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        if let Some(dir) = project_dir {
            current.anchor_paths(dir);
        }

        Ok(current)
    }

    /// Apply CARDTREE__* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("CARDTREE")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("catalog.cmc_below")
                .with_list_parse_key("catalog.cmc_at_least")
                .with_list_parse_key("catalog.stat_below")
                .with_list_parse_key("catalog.stat_at_least"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("cards_file") {
            settings.cards_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("output_file") {
            settings.output_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<u32>("catalog.exact_max") {
            settings.catalog.exact_max = val;
        }
        if let Ok(val) = config.get::<Vec<u32>>("catalog.cmc_below") {
            settings.catalog.cmc_below = val;
        }
        if let Ok(val) = config.get::<Vec<u32>>("catalog.cmc_at_least") {
            settings.catalog.cmc_at_least = val;
        }
        if let Ok(val) = config.get::<Vec<u32>>("catalog.stat_below") {
            settings.catalog.stat_below = val;
        }
        if let Ok(val) = config.get::<Vec<u32>>("catalog.stat_at_least") {
            settings.catalog.stat_at_least = val;
        }
        if let Ok(val) = config.get_bool("catalog.type_questions") {
            settings.catalog.type_questions = val;
        }
        if let Ok(val) = config.get_bool("catalog.keyword_questions") {
            settings.catalog.keyword_questions = val;
        }
        if let Ok(val) = config.get_bool("build.verify_unique_names") {
            settings.build.verify_unique_names = val;
        }
        if let Ok(val) = config.get_bool("build.parallel") {
            settings.build.parallel = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# cardtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/cardtree/cardtree.toml
#   Local:  <project_dir>/.cardtree.toml
#   Env:    CARDTREE__* environment variables, e.g. CARDTREE__BUILD__PARALLEL=true
#
# Later layers replace earlier values; arrays are replaced, not merged.

# Card data: JSON array of card objects (name, color_identity, colors,
# type_line, cmc, power, toughness, keywords)
# cards_file = "card-data.json"

# Output file for the decision tree
# output_file = "decision-tree.json"

[catalog]
# Exact-value questions for CMC, power and toughness run from 0 to exact_max
# exact_max = 13

# Range questions
# cmc_below = [3, 5, 7]
# cmc_at_least = [3, 5, 7, 10]
# stat_below = [3]
# stat_at_least = [4, 7]

# Questions mined from the card data
# type_questions = true
# keyword_questions = true

[build]
# Reject card data with duplicate names
# verify_unique_names = true

# Score candidate questions in parallel (same tree either way)
# parallel = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

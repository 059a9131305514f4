//! TOML configuration.
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! [validator]
//! marker-class = "css-quest-validation-target"
//! sentinel-value = "rgb(173, 255, 47)"
//!
//! [arena]
//! base-font-size = 16.0
//!
//! [catalog]
//! module-order = ["selectors", "box-model", "flexbox"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct QuestConfig {
    pub validator: ValidatorConfig,
    pub arena: ArenaConfig,
    pub catalog: CatalogConfig,
}

impl QuestConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Reserved sentinel values used by selector solutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ValidatorConfig {
    /// Class temporarily added to targeted elements.
    pub marker_class: String,
    /// Property learners set to the sentinel value.
    pub marker_property: String,
    /// Value that marks an element as styled by the learner.
    pub sentinel_value: String,
    /// Treat an expected value that is a single color as its `rgb()` form.
    pub canonicalize_expected_colors: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            marker_class: "css-quest-validation-target".to_string(),
            marker_property: "background-color".to_string(),
            sentinel_value: "rgb(173, 255, 47)".to_string(),
            canonicalize_expected_colors: false,
        }
    }
}

/// The rendered challenge arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ArenaConfig {
    /// Root font size in pixels.
    pub base_font_size: f32,
    /// Base stylesheet text, replacing the built-in preset classes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_css: Option<String>,
    /// Base stylesheet file. Ignored when `base-css` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_css_path: Option<PathBuf>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            base_font_size: 16.0,
            base_css: None,
            base_css_path: None,
        }
    }
}

/// Challenge catalog ordering and titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// Module keys in presentation order. Unlisted modules follow by name.
    pub module_order: Vec<String>,
    /// Display titles by module key, for modules whose file has none.
    pub module_titles: BTreeMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let module_order = [
            "selectors",
            "box-model",
            "color-text",
            "flexbox",
            "grid",
            "positioning",
            "transitions-animations",
        ];
        let module_titles = [
            ("selectors", "The Selector Garden"),
            ("box-model", "The Box Model Citadel"),
            ("flexbox", "The Flexbox Fleet"),
        ];

        Self {
            module_order: module_order.iter().map(|m| m.to_string()).collect(),
            module_titles: module_titles
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl CatalogConfig {
    /// Position of a module in the configured order.
    pub fn rank(&self, key: &str) -> Option<usize> {
        self.module_order.iter().position(|m| m == key)
    }
}

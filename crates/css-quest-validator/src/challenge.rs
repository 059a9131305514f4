//! Challenges and the module catalog.
//!
//! Each module is one JSON file named after the module key, holding either a
//! bare array of challenges or an object with a `name` and `challenges`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::logging::{OperationSpan, span_names, targets};
use crate::solution::Solution;

/// One challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// Unique within its module.
    pub id: String,
    pub title: String,
    pub instruction: String,
    /// Markup rendered inside the arena container.
    #[serde(alias = "html")]
    pub html_markup: String,
    /// CSS the editor starts with.
    #[serde(default)]
    pub css_starter: String,
    pub solution: Solution,
}

/// An ordered group of challenges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeModule {
    /// File stem of the module.
    pub key: String,
    /// Display title.
    pub name: String,
    pub challenges: Vec<Challenge>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModuleFile {
    Challenges(Vec<Challenge>),
    Named {
        #[serde(default)]
        name: Option<String>,
        challenges: Vec<Challenge>,
    },
}

impl ChallengeModule {
    /// Parse a module from JSON text.
    ///
    /// The title comes from the file, then from `config`, then the key.
    pub fn from_json(key: &str, text: &str, config: &CatalogConfig) -> serde_json::Result<Self> {
        let (name, challenges) = match serde_json::from_str(text)? {
            ModuleFile::Challenges(challenges) => (None, challenges),
            ModuleFile::Named { name, challenges } => (name, challenges),
        };
        let name = name
            .or_else(|| config.module_titles.get(key).cloned())
            .unwrap_or_else(|| key.to_string());

        Ok(Self {
            key: key.to_string(),
            name,
            challenges,
        })
    }

    /// Look up a challenge by id.
    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    /// Number of challenges.
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    /// Check whether the module has no challenges.
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    fn check_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for challenge in &self.challenges {
            if !seen.insert(challenge.id.as_str()) {
                return Err(Error::DuplicateChallenge {
                    module: self.key.clone(),
                    id: challenge.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// All loaded challenge modules, in presentation order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    modules: Vec<ChallengeModule>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir` as a module.
    pub fn load_dir(dir: impl AsRef<Path>, config: &CatalogConfig) -> Result<Self> {
        let _span = OperationSpan::new(span_names::CATALOG);
        let dir = dir.as_ref();

        let mut catalog = Self::new();
        for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let path = entry.map_err(|e| Error::io(dir, e))?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let text = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            let module = ChallengeModule::from_json(key, &text, config).map_err(|e| Error::json(&path, e))?;
            catalog.insert(module, config)?;
        }

        tracing::info!(
            target: targets::CATALOG,
            dir = %dir.display(),
            modules = catalog.modules.len(),
            challenges = catalog.challenge_count(),
            "loaded challenge catalog"
        );
        Ok(catalog)
    }

    /// Add a module, keeping the configured order.
    ///
    /// A module with the same key is replaced.
    pub fn insert(&mut self, module: ChallengeModule, config: &CatalogConfig) -> Result<()> {
        module.check_unique_ids()?;

        self.modules.retain(|m| m.key != module.key);
        self.modules.push(module);
        self.modules.sort_by(|a, b| {
            let rank = |key: &str| config.rank(key).unwrap_or(usize::MAX);
            rank(&a.key).cmp(&rank(&b.key)).then_with(|| a.key.cmp(&b.key))
        });
        Ok(())
    }

    /// Modules in order.
    pub fn modules(&self) -> &[ChallengeModule] {
        &self.modules
    }

    /// Module keys and titles in order.
    pub fn titles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.modules.iter().map(|m| (m.key.as_str(), m.name.as_str()))
    }

    /// Look up a module.
    pub fn module(&self, key: &str) -> Result<&ChallengeModule> {
        self.modules
            .iter()
            .find(|m| m.key == key)
            .ok_or_else(|| Error::UnknownModule(key.to_string()))
    }

    /// Look up a challenge.
    pub fn challenge(&self, module: &str, id: &str) -> Result<&Challenge> {
        self.module(module)?
            .challenge(id)
            .ok_or_else(|| Error::UnknownChallenge {
                module: module.to_string(),
                id: id.to_string(),
            })
    }

    /// Total number of challenges.
    pub fn challenge_count(&self) -> usize {
        self.modules.iter().map(ChallengeModule::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECTORS: &str = r##"[
        {
            "id": "sel-1",
            "title": "Select the plates",
            "instruction": "Select the plate elements.",
            "html": "<plate></plate><plate></plate>",
            "cssStarter": "/* Your CSS here */",
            "solution": {"type": "selector", "selector": "plate"}
        },
        {
            "id": "sel-2",
            "title": "Select the fancy plate",
            "instruction": "Select the plate with id fancy.",
            "htmlMarkup": "<plate id=\"fancy\"></plate><plate></plate>",
            "solution": {"kind": "selector", "selector": "#fancy"}
        }
    ]"##;

    #[test]
    fn parses_bare_arrays() {
        let module = ChallengeModule::from_json("selectors", SELECTORS, &CatalogConfig::default()).unwrap();

        assert_eq!(module.name, "The Selector Garden");
        assert_eq!(module.len(), 2);
        assert_eq!(module.challenges[0].html_markup, "<plate></plate><plate></plate>");
        assert_eq!(module.challenges[1].css_starter, "");
        assert_eq!(module.challenge("sel-2").unwrap().solution, Solution::selector("#fancy"));
    }

    #[test]
    fn parses_named_modules() {
        let text = format!(r#"{{"name": "Grid Garrison", "challenges": {SELECTORS}}}"#);
        let module = ChallengeModule::from_json("grid", &text, &CatalogConfig::default()).unwrap();

        assert_eq!(module.name, "Grid Garrison");
        assert_eq!(module.key, "grid");
    }

    #[test]
    fn untitled_modules_use_their_key() {
        let module = ChallengeModule::from_json("misc", "[]", &CatalogConfig::default()).unwrap();
        assert_eq!(module.name, "misc");
        assert!(module.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let text = SELECTORS.replace("sel-2", "sel-1");
        let module = ChallengeModule::from_json("selectors", &text, &CatalogConfig::default()).unwrap();

        let err = Catalog::new().insert(module, &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, Error::DuplicateChallenge { ref id, .. } if id == "sel-1"));
    }

    #[test]
    fn lookup_errors() {
        let config = CatalogConfig::default();
        let mut catalog = Catalog::new();
        catalog
            .insert(ChallengeModule::from_json("selectors", SELECTORS, &config).unwrap(), &config)
            .unwrap();

        assert!(catalog.challenge("selectors", "sel-1").is_ok());
        assert!(matches!(catalog.module("grid"), Err(Error::UnknownModule(_))));
        assert!(matches!(
            catalog.challenge("selectors", "sel-9"),
            Err(Error::UnknownChallenge { .. })
        ));
    }
}

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

use crate::tdslc::analyzer::rules::{DEFAULT_MAX_NODE_COUNT, RuleSet};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in `{path}`: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid JSON in `{path}`: {source}")]
    Json {
        path: String,
        #[source]
        source: sonic_rs::Error,
    },
    #[error("unsupported file format for `{0}` (expected .toml or .json)")]
    UnknownFormat(String),
}

/// Settings for one compiler instance. Every field has a default so an empty
/// file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DslConfig {
    #[serde(default)]
    pub validation_rules: RuleSet,
    #[serde(default = "default_max_node_count")]
    pub max_node_count: usize,
    #[serde(default)]
    pub validate_structure: bool,
    #[serde(default)]
    pub aggregate: bool,
}

fn default_max_node_count() -> usize {
    DEFAULT_MAX_NODE_COUNT
}

impl Default for DslConfig {
    fn default() -> Self {
        Self {
            validation_rules: RuleSet::default(),
            max_node_count: DEFAULT_MAX_NODE_COUNT,
            validate_structure: false,
            aggregate: false,
        }
    }
}

impl DslConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_file(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content).map_err(|source| ConfigError::Toml {
                path: path.display().to_string(),
                source,
            }),
            Some("json") => sonic_rs::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.display().to_string(),
                source,
            }),
            _ => Err(ConfigError::UnknownFormat(path.display().to_string())),
        }
    }

    pub fn with_rules(mut self, rules: &str) -> Self {
        self.validation_rules = RuleSet::parse(rules);
        self
    }

    pub fn with_max_node_count(mut self, max_node_count: usize) -> Self {
        self.max_node_count = max_node_count;
        self
    }

    pub fn with_structure_validation(mut self, enabled: bool) -> Self {
        self.validate_structure = enabled;
        self
    }

    pub fn with_aggregate(mut self, aggregate: bool) -> Self {
        self.aggregate = aggregate;
        self
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = DslConfig::from_toml_str("").unwrap();
        assert_eq!(config, DslConfig::default());
        assert_eq!(config.validation_rules, RuleSet::ALL);
        assert_eq!(config.max_node_count, 100);
        assert!(!config.validate_structure);
    }

    #[test]
    fn test_toml_overrides() {
        let config = DslConfig::from_toml_str(
            r#"
validation_rules = "loop"
max_node_count = 50
validate_structure = true
"#,
        )
        .unwrap();
        assert!(config.validation_rules.loop_check);
        assert!(!config.validation_rules.node_count_check);
        assert_eq!(config.max_node_count, 50);
        assert!(config.validate_structure);
        assert!(!config.aggregate);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"validation_rules": "none", "aggregate": true}}"#).unwrap();

        let config = DslConfig::load(file.path()).unwrap();
        assert!(config.validation_rules.is_empty());
        assert!(config.aggregate);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = DslConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DslConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

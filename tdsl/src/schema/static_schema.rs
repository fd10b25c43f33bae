use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    config::{ConfigError, read_file},
    schema::{EdgeKind, EdgeRule, SchemaOracle},
};

/// An in-memory schema, usually loaded from a TOML or JSON file:
///
/// ```toml
/// [nodes.pnf]
/// properties = ["pnf-name", "prov-status"]
///
/// [[edges]]
/// from = "pnf"
/// to = "pserver"
/// label = "tosca.relationships.HostedOn"
/// kind = "cousin"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSchema {
    #[serde(default)]
    pub nodes: IndexMap<String, NodeDef>,
    #[serde(default)]
    pub edges: Vec<EdgeRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDef {
    #[serde(default)]
    pub properties: IndexSet<String>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node<I, S>(mut self, node_type: &str, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes
            .entry(node_type.to_string())
            .or_default()
            .properties
            .extend(properties.into_iter().map(Into::into));
        self
    }

    pub fn with_edge(mut self, from: &str, to: &str, label: &str, kind: EdgeKind) -> Self {
        self.edges.push(EdgeRule {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
            kind,
        });
        self
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_file(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|source| ConfigError::Toml {
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
}

impl SchemaOracle for StaticSchema {
    fn edge_rules(&self, from: &str, to: &str) -> Vec<EdgeRule> {
        self.edges
            .iter()
            .filter(|rule| rule.connects(from, to))
            .cloned()
            .collect()
    }

    fn node_properties(&self, node_type: &str) -> Option<Vec<String>> {
        self.nodes
            .get(node_type)
            .map(|def| def.properties.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCHEMA_TOML: &str = r#"
[nodes.pnf]
properties = ["pnf-name", "prov-status", "in-maint"]

[nodes.pserver]
properties = ["hostname"]

[[edges]]
from = "pnf"
to = "pserver"
label = "tosca.relationships.HostedOn"
kind = "cousin"

[[edges]]
from = "pserver"
to = "p-interface"
label = "tosca.relationships.network.BindsTo"
"#;

    #[test]
    fn test_edge_rules_match_both_directions() {
        let schema: StaticSchema = toml::from_str(SCHEMA_TOML).unwrap();

        let forward = schema.edge_rules("pnf", "pserver");
        assert_eq!(forward.len(), 1);
        assert_eq!(forward[0].kind, EdgeKind::Cousin);

        let backward = schema.edge_rules("pserver", "pnf");
        assert_eq!(backward, forward);

        assert!(schema.edge_rules("pnf", "p-interface").is_empty());
    }

    #[test]
    fn test_edge_kind_defaults_to_tree() {
        let schema: StaticSchema = toml::from_str(SCHEMA_TOML).unwrap();
        let rules = schema.edge_rules("pserver", "p-interface");
        assert_eq!(rules[0].kind, EdgeKind::Tree);
    }

    #[test]
    fn test_node_properties() {
        let schema: StaticSchema = toml::from_str(SCHEMA_TOML).unwrap();
        assert_eq!(
            schema.node_properties("pnf"),
            Some(vec![
                "pnf-name".to_string(),
                "prov-status".to_string(),
                "in-maint".to_string()
            ])
        );
        assert_eq!(schema.node_properties("widget"), None);
    }

    #[test]
    fn test_builder_matches_loaded_schema() {
        let built = StaticSchema::new()
            .with_node("pnf", ["pnf-name", "prov-status", "in-maint"])
            .with_node("pserver", ["hostname"])
            .with_edge(
                "pnf",
                "pserver",
                "tosca.relationships.HostedOn",
                EdgeKind::Cousin,
            )
            .with_edge(
                "pserver",
                "p-interface",
                "tosca.relationships.network.BindsTo",
                EdgeKind::Tree,
            );
        let loaded: StaticSchema = toml::from_str(SCHEMA_TOML).unwrap();
        assert_eq!(built, loaded);
    }

    #[test]
    fn test_load_json_schema_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"nodes": {{"complex": {{"properties": ["physical-location-id"]}}}}, "edges": []}}"#
        )
        .unwrap();

        let schema = StaticSchema::load(file.path()).unwrap();
        assert!(schema.node_properties("complex").is_some());
        assert!(schema.edges.is_empty());
    }
}

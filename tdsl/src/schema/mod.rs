//! Schema collaborators consulted by the compiler.
//!
//! The compiler only reads from a [`SchemaOracle`]; one oracle can be shared by
//! any number of concurrent compilations.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod static_schema;

pub use static_schema::StaticSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Parent/child containment edge.
    #[default]
    Tree,
    /// Peer relationship between independent nodes.
    Cousin,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Tree => write!(f, "tree"),
            EdgeKind::Cousin => write!(f, "cousin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRule {
    pub from: String,
    pub to: String,
    pub label: String,
    #[serde(default)]
    pub kind: EdgeKind,
}

impl EdgeRule {
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Answers edge legality and node property questions.
pub trait SchemaOracle: Send + Sync {
    /// Every rule allowing a traversal between the two node types, in either
    /// direction. Empty when the traversal is illegal.
    fn edge_rules(&self, from: &str, to: &str) -> Vec<EdgeRule>;

    /// The properties a node type supports, or `None` for an unknown type.
    fn node_properties(&self, node_type: &str) -> Option<Vec<String>>;
}

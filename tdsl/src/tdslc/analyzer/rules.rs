//! Post-compilation rule checks.
//!
//! Both rules are independent: each enabled rule runs, and every failure is
//! reported, so a query can fail loop and node-count validation at once.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::protocol::error::DslError;

pub const DEFAULT_MAX_NODE_COUNT: usize = 100;

/// The set of enabled validation rules, parsed once from the configured
/// rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RuleSet {
    pub loop_check: bool,
    pub node_count_check: bool,
}

impl RuleSet {
    pub const ALL: RuleSet = RuleSet {
        loop_check: true,
        node_count_check: true,
    };
    pub const NONE: RuleSet = RuleSet {
        loop_check: false,
        node_count_check: false,
    };

    /// Substring match against `loop`, `nodeCount`, `all` and `none`.
    /// `none` anywhere wins over everything else.
    pub fn parse(rules: &str) -> Self {
        if rules.contains("none") {
            return Self::NONE;
        }
        if rules.contains("all") {
            return Self::ALL;
        }
        RuleSet {
            loop_check: rules.contains("loop"),
            node_count_check: rules.contains("nodeCount"),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.loop_check && !self.node_count_check
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<String> for RuleSet {
    fn from(value: String) -> Self {
        RuleSet::parse(&value)
    }
}

impl From<RuleSet> for String {
    fn from(value: RuleSet) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.loop_check, self.node_count_check) {
            (true, true) => write!(f, "all"),
            (true, false) => write!(f, "loop"),
            (false, true) => write!(f, "nodeCount"),
            (false, false) => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum RuleViolation {
    #[error("loop validation failed")]
    Loop { distinct: usize, total: usize },
    #[error("node count validation failed")]
    NodeCount { count: usize, max: usize },
}

pub struct RuleValidator;

impl RuleValidator {
    pub fn validate(
        rules: &RuleSet,
        edge_log: &[(String, String)],
        node_count: usize,
        max_node_count: usize,
    ) -> Result<(), DslError> {
        if rules.is_empty() {
            debug!("no traversal rules enabled");
            return Ok(());
        }
        let mut violations = Vec::new();

        if rules.loop_check
            && let Err(violation) = check_loops(edge_log)
        {
            violations.push(violation);
        }
        if rules.node_count_check
            && let Err(violation) = check_node_count(node_count, max_node_count)
        {
            violations.push(violation);
        }

        debug!(
            %rules,
            edges = edge_log.len(),
            node_count,
            failed = violations.len(),
            "validated traversal rules"
        );

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DslError::Validation { violations })
        }
    }
}

/// Fails when fewer than half of the traversed edges are distinct.
pub fn check_loops(edge_log: &[(String, String)]) -> Result<(), RuleViolation> {
    let distinct = edge_log.iter().collect::<IndexSet<_>>().len();
    let total = edge_log.len();
    if distinct < total / 2 {
        return Err(RuleViolation::Loop { distinct, total });
    }
    Ok(())
}

pub fn check_node_count(node_count: usize, max_node_count: usize) -> Result<(), RuleViolation> {
    if node_count > max_node_count {
        return Err(RuleViolation::NodeCount {
            count: node_count,
            max: max_node_count,
        });
    }
    Ok(())
}

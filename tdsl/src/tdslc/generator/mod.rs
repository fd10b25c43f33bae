// Copyright 2025 HelixDB Inc.
// SPDX-License-Identifier: AGPL-3.0

//! This is the generator for the traversal DSL. It turns the scope fragments
//! built by the analyzer into Gremlin builder text.
//! The generator methods are broken up into separate files, grouped by general functionality.

use serde::Serialize;
use std::fmt::{self, Display};

use crate::tdslc::generator::scope::ScopeBuilder;

pub mod scope;
pub mod traversal_steps;
pub mod utils;

/// Successful compilation output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub query: String,
    /// Whether result aggregation was requested for this query.
    pub aggregate: bool,
    pub node_count: usize,
    pub edge_count: usize,
}

impl Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query)
    }
}

/// Drains the scope stack from the most recently opened scope down to the
/// root, then restores opening order before concatenating. Fragments and
/// errors are collected separately; any error fails the whole assembly.
pub fn assemble(mut scopes: Vec<ScopeBuilder>) -> Result<String, Vec<String>> {
    let mut collected = Vec::with_capacity(scopes.len());
    while let Some(scope) = scopes.pop() {
        collected.push(scope.into_parts());
    }
    collected.reverse();

    let mut query = String::new();
    let mut errors = Vec::new();
    for (fragment, scope_errors) in collected {
        query.push_str(&fragment);
        errors.extend(scope_errors);
    }

    if errors.is_empty() {
        Ok(query)
    } else {
        Err(errors)
    }
}

// Copyright 2025 HelixDB Inc.
// SPDX-License-Identifier: AGPL-3.0

//! The traversal DSL compiler.
//!
//! `parser` turns DSL text into grammar events, `analyzer` consumes the events
//! and tracks traversal state, `generator` renders the Gremlin builder text.

use std::sync::Arc;
use tracing::info;

use crate::{
    config::DslConfig,
    protocol::error::DslError,
    schema::SchemaOracle,
    tdslc::{analyzer::DslCompiler, events::DslEvent, generator::CompiledQuery},
};

pub mod analyzer;
pub mod events;
pub mod generator;
#[cfg(feature = "parser")]
pub mod parser;

#[cfg(test)]
mod tests;

/// Compiles an already-parsed event stream.
pub fn compile_events<I>(
    events: I,
    config: &DslConfig,
    schema: Option<&dyn SchemaOracle>,
) -> Result<CompiledQuery, DslError>
where
    I: IntoIterator<Item = DslEvent>,
{
    let mut compiler = DslCompiler::new(config.clone(), schema);
    compiler.process_all(events);
    compiler.finish()
}

/// Parses and compiles DSL text.
#[cfg(feature = "parser")]
pub fn compile(
    dsl: &str,
    config: &DslConfig,
    schema: Option<&dyn SchemaOracle>,
) -> Result<CompiledQuery, DslError> {
    let events = parser::DslParser::parse_events(dsl)?;
    compile_events(events, config, schema)
}

/// Shareable entry point: holds configuration and an optional schema, and
/// builds a fresh compiler for every query.
#[derive(Clone, Default)]
pub struct DslProcessor {
    config: DslConfig,
    schema: Option<Arc<dyn SchemaOracle>>,
}

impl DslProcessor {
    pub fn new(config: DslConfig) -> Self {
        Self {
            config,
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: Arc<dyn SchemaOracle>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn config(&self) -> &DslConfig {
        &self.config
    }

    pub fn compile_events<I>(&self, events: I) -> Result<CompiledQuery, DslError>
    where
        I: IntoIterator<Item = DslEvent>,
    {
        let result = compile_events(events, &self.config, self.schema.as_deref());
        log_result(&result);
        result
    }

    #[cfg(feature = "parser")]
    pub fn compile(&self, dsl: &str) -> Result<CompiledQuery, DslError> {
        let result = compile(dsl, &self.config, self.schema.as_deref());
        log_result(&result);
        result
    }
}

fn log_result(result: &Result<CompiledQuery, DslError>) {
    match result {
        Ok(compiled) => info!(
            nodes = compiled.node_count,
            edges = compiled.edge_count,
            aggregate = compiled.aggregate,
            "compiled dsl query"
        ),
        Err(e) => info!(code = e.code(), error = %e, "dsl query rejected"),
    }
}

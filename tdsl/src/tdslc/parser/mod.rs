// Copyright 2025 HelixDB Inc.
// SPDX-License-Identifier: AGPL-3.0

//! Text front-end for the traversal DSL.
//! The pest tree is walked once and flattened into the [`DslEvent`] stream the
//! analyzer consumes. Parsing methods are split by what they recognise.

use crate::tdslc::{events::DslEvent, parser::errors::ParserError};
use pest::Parser as PestParser;
use pest_derive::Parser;
use tracing::trace;

pub mod ariadne_render;
pub mod errors;
pub mod filter_parse_methods;
pub mod traversal_parse_methods;
pub mod utils;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct DslParser {
    pub(super) events: Vec<DslEvent>,
}

impl DslParser {
    /// Parses a full query into its event stream.
    pub fn parse_events(input: &str) -> Result<Vec<DslEvent>, ParserError> {
        let pair = match DslParser::parse(Rule::query, input) {
            Ok(mut pairs) => pairs
                .next()
                .ok_or_else(|| ParserError::from("Empty input"))?,
            Err(e) => return Err(ParserError::from(e)),
        };

        let mut parser = DslParser { events: Vec::new() };
        parser.emit(DslEvent::QueryEnter);
        for pair in pair.into_inner() {
            match pair.as_rule() {
                Rule::start_statement => parser.parse_start_statement(pair)?,
                Rule::EOI => {}
                other => {
                    return Err(ParserError::from(format!(
                        "Unexpected rule in query: {other:?}"
                    )));
                }
            }
        }
        parser.emit(DslEvent::QueryExit);

        trace!(events = parser.events.len(), "parsed dsl query");
        Ok(parser.events)
    }

    pub(super) fn emit(&mut self, event: DslEvent) {
        self.events.push(event);
    }
}

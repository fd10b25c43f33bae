use std::ops::Range;

use pest::error::{InputLocation, LineColLocation};
use thiserror::Error;

use crate::tdslc::parser::Rule;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("Parse error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        span: Range<usize>,
        line: usize,
        column: usize,
    },
    #[error("Parse error: {0}")]
    Message(String),
}

impl ParserError {
    /// Byte range of the offending input, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            ParserError::Syntax { span, .. } => Some(span.clone()),
            ParserError::Message(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParserError::Syntax { message, .. } | ParserError::Message(message) => message,
        }
    }
}

impl From<pest::error::Error<Rule>> for ParserError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        let e = e.renamed_rules(rule_name);
        let span = match e.location {
            InputLocation::Pos(pos) => pos..pos + 1,
            InputLocation::Span((start, end)) => start..end,
        };
        let (line, column) = match e.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        ParserError::Syntax {
            message: e.variant.message().to_string(),
            span,
            line,
            column,
        }
    }
}

impl From<String> for ParserError {
    fn from(e: String) -> Self {
        ParserError::Message(e)
    }
}

impl From<&str> for ParserError {
    fn from(e: &str) -> Self {
        ParserError::Message(e.to_string())
    }
}

fn rule_name(rule: &Rule) -> String {
    match rule {
        Rule::EOI => "end of query",
        Rule::query | Rule::start_statement => "query",
        Rule::nested_statement => "nested traversal",
        Rule::traversal_step => "`>`",
        Rule::union => "`[`",
        Rule::vertex | Rule::label => "node type",
        Rule::where_clause => "`(>`",
        Rule::filter | Rule::edge_filter => "`(`",
        Rule::limit => "`LIMIT`",
        Rule::store => "`*`",
        Rule::negation => "`!`",
        Rule::boolean => "boolean",
        Rule::number | Rule::integer => "number",
        Rule::string_literal | Rule::inner => "quoted string",
        _ => "token",
    }
    .to_string()
}

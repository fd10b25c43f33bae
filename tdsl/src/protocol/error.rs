use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::tdslc::analyzer::rules::RuleViolation;
#[cfg(feature = "parser")]
use crate::tdslc::parser::errors::ParserError;

#[derive(Debug, Error)]
pub enum DslError {
    #[cfg(feature = "parser")]
    #[error("{0}")]
    Parse(#[from] ParserError),
    #[error("no nodes marked for output")]
    NoOutputMarker,
    #[error("{}", .errors.join("; "))]
    Compile { errors: Vec<String> },
    #[error("{}", join_violations(.violations))]
    Validation { violations: Vec<RuleViolation> },
}

/// Lets callers tell a malformed query apart from a query that is too
/// expensive or suspicious to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The query text or event stream could not be compiled.
    Malformed,
    /// The query compiled but never marks anything for output.
    Structural,
    /// A post-compile rule (loop, node count) rejected the query.
    TooExpensive,
}

fn join_violations(violations: &[RuleViolation]) -> String {
    violations.iter().join("; ")
}

impl Serialize for DslError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.to_string())
    }
}

impl DslError {
    pub fn code(&self) -> &'static str {
        match self {
            #[cfg(feature = "parser")]
            DslError::Parse(_) => "PARSE_ERROR",
            DslError::NoOutputMarker => "NO_OUTPUT_MARKER",
            DslError::Compile { .. } => "COMPILE_ERROR",
            DslError::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            #[cfg(feature = "parser")]
            DslError::Parse(_) => ErrorCategory::Malformed,
            DslError::Compile { .. } => ErrorCategory::Malformed,
            DslError::NoOutputMarker => ErrorCategory::Structural,
            DslError::Validation { .. } => ErrorCategory::TooExpensive,
        }
    }
}

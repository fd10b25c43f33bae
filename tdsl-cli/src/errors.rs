use color_eyre::owo_colors::OwoColorize;
use std::fmt;

/// A user-facing failure: what went wrong, where, and what to try next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("{} {}", "error:".red().bold(), self.message);
        if let Some(context) = &self.context {
            out.push_str(&format!("\n  {} {context}", "-->".blue()));
        }
        if let Some(hint) = &self.hint {
            out.push_str(&format!("\n  {} {hint}", "help:".cyan()));
        }
        out
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

//! Verbosity control for CLI output.
//!
//! Command results always go to stdout; progress lines go to stderr and are
//! suppressed in quiet mode.

use color_eyre::owo_colors::OwoColorize;
use std::sync::atomic::{AtomicU8, Ordering};

static VERBOSITY: AtomicU8 = AtomicU8::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Verbosity {
    /// Only errors and the final result
    Quiet = 0,
    Normal = 1,
    /// Also show compiler settings and statistics
    Verbose = 2,
}

impl Verbosity {
    pub fn current() -> Self {
        match VERBOSITY.load(Ordering::Relaxed) {
            0 => Verbosity::Quiet,
            2 => Verbosity::Verbose,
            _ => Verbosity::Normal,
        }
    }

    pub fn set(level: Verbosity) {
        VERBOSITY.store(level as u8, Ordering::Relaxed);
    }

    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    pub fn show_normal(&self) -> bool {
        *self >= Verbosity::Normal
    }

    pub fn show_verbose(&self) -> bool {
        *self >= Verbosity::Verbose
    }

    /// `tracing` filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}

pub mod symbols {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const INFO: &str = "→";
}

pub fn success(message: &str) {
    if Verbosity::current().show_normal() {
        eprintln!("{} {message}", symbols::SUCCESS.green());
    }
}

pub fn failure(message: &str) {
    if Verbosity::current().show_normal() {
        eprintln!("{} {message}", symbols::FAILURE.red());
    }
}

pub fn detail(message: &str) {
    if Verbosity::current().show_verbose() {
        eprintln!("  {} {message}", symbols::INFO.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_levels() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::Verbose.default_log_filter(), "debug");
    }
}

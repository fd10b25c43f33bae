use std::{fs, path::Path};

use tdsl::{DslConfig, StaticSchema, tdslc::analyzer::rules::RuleSet};

use crate::{CompileArgs, QueryArgs, errors::CliError};

pub const ENV_VALIDATION_RULES: &str = "TDSL_VALIDATION_RULES";
pub const ENV_MAX_NODE_COUNT: &str = "TDSL_MAX_NODE_COUNT";
pub const ENV_VALIDATE_STRUCTURE: &str = "TDSL_VALIDATE_STRUCTURE";

/// Config file, then environment, then command-line flags.
pub fn resolve_config<F>(args: &CompileArgs, env: F) -> Result<DslConfig, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match &args.config {
        Some(path) => DslConfig::load(path).map_err(|e| {
            CliError::new(format!("failed to load config `{}`", path.display()))
                .with_context(e.to_string())
                .with_hint("config files must end in .toml or .json")
        })?,
        None => DslConfig::default(),
    };
    let config = apply_env(config, env)?;
    Ok(apply_flags(config, args))
}

pub fn apply_env<F>(mut config: DslConfig, env: F) -> Result<DslConfig, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(rules) = env(ENV_VALIDATION_RULES) {
        config.validation_rules = RuleSet::parse(&rules);
    }
    if let Some(max) = env(ENV_MAX_NODE_COUNT) {
        config.max_node_count = max.trim().parse().map_err(|_| {
            CliError::new(format!("invalid {ENV_MAX_NODE_COUNT} value `{max}`"))
                .with_hint("use a non-negative integer")
        })?;
    }
    if let Some(flag) = env(ENV_VALIDATE_STRUCTURE) {
        config.validate_structure = parse_bool(&flag).ok_or_else(|| {
            CliError::new(format!("invalid {ENV_VALIDATE_STRUCTURE} value `{flag}`"))
                .with_hint("use true/false or 1/0")
        })?;
    }
    Ok(config)
}

pub fn apply_flags(mut config: DslConfig, args: &CompileArgs) -> DslConfig {
    if let Some(rules) = &args.rules {
        config = config.with_rules(rules);
    }
    if let Some(max) = args.max_node_count {
        config = config.with_max_node_count(max);
    }
    if args.validate_structure {
        config = config.with_structure_validation(true);
    }
    if args.aggregate {
        config = config.with_aggregate(true);
    }
    config
}

pub fn load_schema(args: &CompileArgs) -> Result<Option<StaticSchema>, CliError> {
    let Some(path) = &args.schema else {
        return Ok(None);
    };
    StaticSchema::load(path).map(Some).map_err(|e| {
        CliError::new(format!("failed to load schema `{}`", path.display()))
            .with_context(e.to_string())
    })
}

/// Returns the query text and a name to label diagnostics with.
pub fn read_query(args: &QueryArgs) -> Result<(String, String), CliError> {
    match (&args.query, &args.file) {
        (Some(query), _) => Ok((query.clone(), "<query>".to_string())),
        (None, Some(path)) => read_query_file(path),
        (None, None) => Err(CliError::new("no query given")
            .with_context("neither a query argument nor --file was provided")
            .with_hint("pass the query text, e.g. tdsl compile \"pnf*\", or --file <path>")),
    }
}

fn read_query_file(path: &Path) -> Result<(String, String), CliError> {
    let query = fs::read_to_string(path).map_err(|e| {
        CliError::new(format!("failed to read query file `{}`", path.display()))
            .with_context(e.to_string())
    })?;
    Ok((query.trim().to_string(), path.display().to_string()))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

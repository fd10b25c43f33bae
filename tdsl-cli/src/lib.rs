// Library interface for tdsl-cli to enable testing
use clap::Args;
use std::path::PathBuf;

pub mod commands;
pub mod config;
pub mod errors;
pub mod output;

/// Where the query text comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Query text (e.g. "pnf*('prov-status','in_service') > pserver")
    pub query: Option<String>,

    /// Read the query from a file instead
    #[clap(short, long, conflicts_with = "query")]
    pub file: Option<PathBuf>,
}

/// Compiler settings shared by `compile` and `check`.
#[derive(Args, Debug, Clone, Default)]
pub struct CompileArgs {
    /// Config file (.toml or .json)
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Schema file (.toml or .json) used for edge and filter-key validation
    #[clap(short, long)]
    pub schema: Option<PathBuf>,

    /// Enabled validation rules ("all", "none", "loop", "nodeCount")
    #[clap(short, long)]
    pub rules: Option<String>,

    /// Maximum number of nodes a query may visit
    #[clap(long)]
    pub max_node_count: Option<usize>,

    /// Check root filter keys against the schema
    #[clap(long)]
    pub validate_structure: bool,

    /// End the query with an aggregated result
    #[clap(long)]
    pub aggregate: bool,
}

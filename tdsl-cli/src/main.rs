use clap::{Parser, Subcommand};
use eyre::Result;
use tdsl_cli::{CompileArgs, QueryArgs, commands, output::Verbosity};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tdsl")]
#[command(version, about = "Compile traversal DSL queries into Gremlin builder text")]
struct Cli {
    /// Suppress output (errors and final result only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show compiler settings, statistics and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query and print the generated traversal
    Compile {
        #[clap(flatten)]
        query: QueryArgs,

        #[clap(flatten)]
        args: CompileArgs,

        /// Print the compiled query as JSON
        #[clap(long)]
        json: bool,
    },

    /// Validate a query without printing it
    Check {
        #[clap(flatten)]
        query: QueryArgs,

        #[clap(flatten)]
        args: CompileArgs,
    },

    /// Print the event stream the parser produces for a query
    Events {
        #[clap(flatten)]
        query: QueryArgs,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let env_res = dotenvy::dotenv();

    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    Verbosity::set(verbosity);

    let filter = if cli.verbose {
        EnvFilter::new(verbosity.default_log_filter())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(verbosity.default_log_filter()))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
    if let Err(e) = env_res {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let env = |key: &str| std::env::var(key).ok();
    let result = match cli.command {
        Commands::Compile { query, args, json } => commands::compile::run(&query, &args, json, env),
        Commands::Check { query, args } => commands::check::run(&query, &args, env),
        Commands::Events { query } => commands::events::run(&query),
    };

    match result {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

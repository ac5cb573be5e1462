mod commands;
mod config;
mod context;
mod error;
mod input;
mod shell;

use clap::{Parser, Subcommand};
use config::Config;
use context::Context;
use error::CliResult;
use std::{path::PathBuf, process::ExitCode};

///
/// Cli
///

#[derive(Parser)]
#[command(name = "geocql", about = "Parse and evaluate CQL filters", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (defaults to ./geocql.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print [debug] lines to stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Override the parser nesting limit
    #[arg(long, global = true)]
    max_depth: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a filter and print its canonical form
    Check {
        /// CQL filter text
        cql: String,
    },

    /// Print the JSON-lines records a filter accepts
    Filter {
        /// CQL filter text
        cql: String,

        /// JSON-lines file (stdin when omitted)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },

    /// Interactive shell evaluating filters against loaded records
    Shell {
        /// JSON-lines file to load
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(max_depth) = cli.max_depth {
        config.parse = config.parse.with_max_depth(max_depth);
    }

    let ctx = Context::new(config, cli.debug);
    ctx.debug_log(format!("config: {:?}", ctx.config));

    match cli.command {
        Commands::Check { cql } => commands::check(&ctx, &cql),
        Commands::Filter { cql, input } => commands::filter(&ctx, &cql, input.as_deref()),
        Commands::Shell { input } => {
            let records = match input.as_deref() {
                Some(path) => input::read_records(Some(path), &ctx.config.records)?,
                None => Vec::new(),
            };
            shell::run(&ctx, &records)
        }
    }
}

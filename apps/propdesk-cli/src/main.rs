mod access;
mod context;
mod describe;
mod list;
mod sort;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use propdesk_core::{PropdeskConfig, init_logging};

use crate::context::Context;

/// Propdesk - inspect schemas, sort keys and access filters
#[derive(Parser)]
#[command(name = "propdesk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Schema document, overrides `schema_path` from the config
    #[arg(short, long, global = true)]
    schema: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fields of a model
    Describe(describe::DescribeArgs),
    /// Validate a sort key and print the resulting order clause
    CheckSort(sort::CheckSortArgs),
    /// Print the row restriction an actor gets for a subject
    Access(access::AccessArgs),
    /// Run a list query against a JSON data file
    List(list::ListArgs),
    /// Print effective configuration (YAML) and exit
    PrintConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PropdeskConfig::load(cli.config.as_deref())?;
    config.logging = config.logging.with_verbosity(cli.verbose);
    init_logging(&config.logging);

    if let Some(schema) = cli.schema {
        config.schema_path = Some(schema);
    }
    tracing::debug!(schema = ?config.schema_path, "propdesk starting");

    let ctx = Context::new(config);
    match cli.command {
        Commands::Describe(args) => args.run(&ctx),
        Commands::CheckSort(args) => args.run(&ctx),
        Commands::Access(args) => args.run(&ctx).await,
        Commands::List(args) => args.run(&ctx).await,
        Commands::PrintConfig => {
            print!("{}", ctx.config().to_yaml()?);
            Ok(())
        }
    }
}

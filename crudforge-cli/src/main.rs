//! crudforge CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{DescribeCommand, EntitiesCommand, GenerateCommand};
use crudforge::config::CrudforgeConfig;
use crudforge::observability::{self, ObservabilityConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crudforge")]
#[command(version)]
#[command(about = "Generate a CRUD/search artifact family from a JPA entity", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file merged over the user and project files
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every artifact for an entity
    Generate {
        /// Entity file, or a directory to pick one from
        path: PathBuf,
        /// Output root; packages become directories below it
        #[arg(short, long, default_value = "generated")]
        out: PathBuf,
        /// Comma separated field names instead of the prompt
        #[arg(short, long, conflicts_with = "all")]
        fields: Option<String>,
        /// Select every field without prompting
        #[arg(short, long)]
        all: bool,
        /// List the files without writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Show what is extracted from an entity file
    Describe {
        /// Entity file
        file: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List entity files below a directory
    Entities {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = ObservabilityConfig::new(cli.verbose);
    if cli.log_json {
        logging = logging.with_json();
    }
    observability::init(&logging);

    let config = CrudforgeConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Generate {
            path,
            out,
            fields,
            all,
            dry_run,
        } => {
            GenerateCommand::new(path, out, fields, all, dry_run).execute(config)?;
        }
        Commands::Describe { file, json } => {
            DescribeCommand::new(file, json).execute()?;
        }
        Commands::Entities { dir } => {
            EntitiesCommand::new(dir).execute(&config)?;
        }
    }

    Ok(())
}

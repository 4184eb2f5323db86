//! blueprint-gen CLI
//!
//! Command-line tool for generating Laravel migration files from JSON
//! column specifications.

mod error;
mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use blueprint_core::{render_migration, MigrationIntent};

use crate::error::CliError;
use crate::writer::MigrationWriter;

/// Generates Laravel migration files from declarative column specs.
#[derive(Parser)]
#[command(name = "blueprint-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a migration file from a spec.
    Generate {
        /// Path to the JSON spec file describing the migration.
        #[arg(short, long)]
        spec: PathBuf,

        /// Directory to write the migration file into.
        #[arg(short, long, default_value = "migrations")]
        out_dir: PathBuf,

        /// Print the migration without writing a file (dry run).
        #[arg(long)]
        dry_run: bool,
    },

    /// Render a spec to stdout without touching the filesystem.
    Preview {
        /// Path to the JSON spec file describing the migration.
        #[arg(short, long)]
        spec: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Generate {
            spec,
            out_dir,
            dry_run,
        } => {
            let intent = load_intent(&spec)?;

            if dry_run {
                let code = render_migration(&intent).map_err(CliError::from)?;
                println!(
                    "Would create migration: {}",
                    out_dir.join(MigrationWriter::file_name(&intent)).display()
                );
                println!("\n{code}");
            } else {
                let writer = MigrationWriter::new(out_dir);
                let path = writer.write(&intent)?;
                info!("Migration written to {}", path.display());
            }
        }

        Commands::Preview { spec } => {
            let intent = load_intent(&spec)?;
            let code = render_migration(&intent).map_err(CliError::from)?;
            println!("{code}");
        }
    }

    Ok(())
}

/// Reads and decodes a migration intent from a JSON spec file.
fn load_intent(path: &Path) -> Result<MigrationIntent, CliError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| CliError::ParseSpec {
        path: path.to_path_buf(),
        source,
    })
}

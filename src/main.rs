// ABOUTME: CLI entry point for sqlite-schema-diff
// ABOUTME: Parses commands and routes to appropriate handlers

use clap::{Parser, Subcommand};
use sqlite_schema_diff::commands;
use sqlite_schema_diff::config;
use sqlite_schema_diff::export::ExportFormat;
use sqlite_schema_diff::filter::TableFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlite-schema-diff")]
#[command(
    about = "Compare the table and column schemas of two SQLite database files",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two database schemas and export the differences
    Diff {
        /// Database file A (the "before" side)
        #[arg(long)]
        database_a: PathBuf,
        /// Database file B (the "after" side)
        #[arg(long)]
        database_b: PathBuf,
        /// Report file path; the extension selects the format (.txt, .csv, .xml, .yml)
        #[arg(short, long)]
        output: PathBuf,
        /// Force the report format instead of inferring it from the extension
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// Leave column type annotations out of the report
        #[arg(long)]
        no_types: bool,
        /// Compare only these tables (comma-separated)
        #[arg(long, value_delimiter = ',')]
        include_tables: Option<Vec<String>>,
        /// Skip these tables (comma-separated)
        #[arg(long, value_delimiter = ',')]
        exclude_tables: Option<Vec<String>>,
        /// Path to a TOML config file with diff settings
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip the confirmation prompt when the schemas are identical
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Report the schema and version metadata of one database
    Inspect {
        /// Database file to inspect
        #[arg(long)]
        database: PathBuf,
        /// Emit the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging - default to INFO level if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diff {
            database_a,
            database_b,
            output,
            format,
            no_types,
            include_tables,
            exclude_tables,
            config,
            yes,
        } => {
            let file_config = config::load_config(config.as_deref())?;
            let settings = file_config.resolve(no_types, include_tables, exclude_tables);
            let filter = TableFilter::new(settings.include_tables, settings.exclude_tables)?;

            commands::diff(&commands::DiffOptions {
                database_a,
                database_b,
                output,
                format,
                show_types: settings.show_types,
                filter,
                assume_yes: yes,
            })
        }
        Commands::Inspect { database, json } => {
            commands::inspect(&commands::InspectOptions { database, json })
        }
    }
}

//! CLI command definitions and dispatch.

pub mod check;
pub mod table;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use prepaccess_core::error::AppError;

/// PrepAccess — role and subscription access-control engine
#[derive(Debug, Parser)]
#[command(name = "prepaccess", version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect the static policy table
    Table(table::TableArgs),
    /// Run an access check offline against the static table
    Check(check::CheckArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Table(args) => table::execute(args, self.format),
            Commands::Check(args) => check::execute(args, self.format).await,
        }
    }
}

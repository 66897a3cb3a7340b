//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod analyze;
mod insights;
mod report;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a worker log into a job table plus metric documents
    Analyze {
        /// Worker log to read
        log: PathBuf,
        /// CSV table to write; JSON documents land next to it
        out: PathBuf,
    },
    /// Overview of a job table with predictive, security and anomaly findings
    Insights {
        /// Job table written by `analyze`
        table: PathBuf,
    },
    /// Processing history of files matching a name
    FileInsight {
        /// Job table written by `analyze`
        table: PathBuf,
        /// Case-insensitive part of the file name
        name: String,
    },
    /// Executive summary as JSON
    ExecutiveSummary {
        /// Job table written by `analyze`
        table: PathBuf,
    },
    /// Successful jobs that ran far slower than their peers
    Anomalies {
        /// Job table written by `analyze`
        table: PathBuf,
    },
    /// Availability, recovery, cost and quality figures
    BusinessMetrics {
        /// Job table written by `analyze`
        table: PathBuf,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Analyze { log, out } => analyze::handle_analyze(&log, &out, config),
        Commands::Insights { table } => insights::handle_insights(&table, config),
        Commands::FileInsight { table, name } => {
            insights::handle_file_insight(&table, &name, config)
        }
        Commands::ExecutiveSummary { table } => report::handle_executive_summary(&table, config),
        Commands::Anomalies { table } => report::handle_anomalies(&table, config),
        Commands::BusinessMetrics { table } => report::handle_business_metrics(&table, config),
    }
}

//! Jobscope CLI
//!
//! Command-line interface for parsing DataPusher+ worker logs and reporting
//! on the resulting job table.

mod commands;
mod config;
mod render;
mod store;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, Overrides};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobscope")]
#[command(about = "DataPusher+ worker log analytics", long_about = None)]
struct Cli {
    /// Dollars per CPU hour used for cost estimates
    #[arg(long, global = true, env = "JOBSCOPE_COST_PER_CPU_HOUR")]
    cost_per_cpu_hour: Option<f64>,

    /// Error rate above which a file format is flagged as high risk (0-1)
    #[arg(long, global = true, env = "JOBSCOPE_HIGH_RISK_FAILURE_RATE")]
    high_risk_failure_rate: Option<f64>,

    /// Maximum seconds between errors counted as one failure burst
    #[arg(long, global = true, env = "JOBSCOPE_SEQUENTIAL_WINDOW_SECS")]
    sequential_window_secs: Option<i64>,

    /// Quality score a job must reach to meet the SLA
    #[arg(long, global = true, env = "JOBSCOPE_QUALITY_SLA")]
    quality_sla: Option<u8>,

    /// Times a file may be processed before it is reported as suspicious
    #[arg(long, global = true, env = "JOBSCOPE_REPEAT_THRESHOLD")]
    repeat_threshold: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobscope=info,jobscope_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_overrides(Overrides {
        cost_per_cpu_hour: cli.cost_per_cpu_hour,
        high_risk_failure_rate: cli.high_risk_failure_rate,
        sequential_window_secs: cli.sequential_window_secs,
        quality_sla: cli.quality_sla,
        repeat_threshold: cli.repeat_threshold,
    })?;

    handle_command(cli.command, &config)
}

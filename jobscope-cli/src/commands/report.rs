//! Report command handlers
//!
//! Executive summary, anomaly and business metric output for a job table.

use anyhow::Result;
use jobscope_core::metrics::{detect_performance_anomalies, generate_business_metrics};
use jobscope_core::report::executive_summary;
use std::path::Path;

use crate::config::Config;
use crate::render;
use crate::store;

pub fn handle_executive_summary(table: &Path, config: &Config) -> Result<()> {
    let jobs = store::read_jobs(table)?;
    let summary = executive_summary(&jobs, &config.thresholds);

    let document = serde_json::json!({ "executive_summary": summary });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

pub fn handle_anomalies(table: &Path, config: &Config) -> Result<()> {
    let jobs = store::read_jobs(table)?;
    for anomaly in detect_performance_anomalies(&jobs, &config.thresholds) {
        println!("{}", render::anomaly_line(&anomaly));
    }
    Ok(())
}

pub fn handle_business_metrics(table: &Path, config: &Config) -> Result<()> {
    let jobs = store::read_jobs(table)?;
    let metrics = generate_business_metrics(&jobs, &config.thresholds);
    for line in render::business_lines(&metrics) {
        println!("{}", line);
    }
    Ok(())
}

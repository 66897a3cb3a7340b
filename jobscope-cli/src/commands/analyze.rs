//! Analyze command handler
//!
//! Parses a worker log into the job table and writes every metric document
//! next to it.

use anyhow::Result;
use colored::*;
use jobscope_core::metrics::{
    analyze_failure_patterns, calculate_efficiency, detect_performance_anomalies,
    generate_business_metrics, generate_predictive_insights, generate_security_insights,
};
use jobscope_core::report::score_jobs;
use jobscope_core::{JobRecord, Thresholds, parse_worker_log};
use std::path::Path;

use crate::config::Config;
use crate::store;

pub fn handle_analyze(log: &Path, out: &Path, config: &Config) -> Result<()> {
    let text = store::read_log(log)?;
    let jobs = parse_worker_log(&text);

    store::write_jobs(out, &jobs)?;
    write_documents(&store::sibling_dir(out), &jobs, &config.thresholds)?;

    println!(
        "{}",
        format!("Enhanced analysis complete: {} jobs processed", jobs.len()).green()
    );
    Ok(())
}

/// Write the JSON metric documents into `dir`
fn write_documents(dir: &Path, jobs: &[JobRecord], thresholds: &Thresholds) -> Result<()> {
    store::write_json(
        &dir.join("performance_metrics.json"),
        &calculate_efficiency(jobs),
    )?;
    store::write_json(
        &dir.join("business_metrics.json"),
        &generate_business_metrics(jobs, thresholds),
    )?;
    store::write_json(
        &dir.join("failure_analysis.json"),
        &analyze_failure_patterns(jobs, thresholds),
    )?;
    store::write_json(
        &dir.join("predictive_insights.json"),
        &generate_predictive_insights(jobs, thresholds),
    )?;
    store::write_json(
        &dir.join("security_analysis.json"),
        &generate_security_insights(jobs, thresholds),
    )?;
    store::write_json(
        &dir.join("anomalies.json"),
        &detect_performance_anomalies(jobs, thresholds),
    )?;
    store::write_json(
        &dir.join("scored_jobs.json"),
        &score_jobs(jobs, thresholds),
    )?;

    tracing::info!("Wrote metric documents to {}", dir.display());

    Ok(())
}

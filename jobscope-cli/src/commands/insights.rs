//! Insight command handlers
//!
//! Human-readable overview of a job table and per-file processing history.

use anyhow::Result;
use colored::*;
use jobscope_core::metrics::stats::mean;
use jobscope_core::metrics::{
    calculate_efficiency, detect_performance_anomalies, generate_predictive_insights,
    generate_security_insights, quality_score,
};
use jobscope_core::{ErrorType, JobRecord, JobStatus};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Config;
use crate::render;
use crate::store;

pub fn handle_insights(table: &Path, config: &Config) -> Result<()> {
    let jobs = store::read_jobs(table)?;

    if jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Job overview ({} job(s)):", jobs.len()).bold());
    for (status, count) in status_counts(&jobs) {
        println!("  {:<12} {}", render::colorize_status(&status), count);
    }

    let errors = error_type_counts(&jobs);
    if !errors.is_empty() {
        println!("\n{}", "Error types:".bold());
        for (error_type, count) in errors {
            println!("  {:<16} {}", error_type.as_str().red(), count);
        }
    }

    let times: Vec<f64> = jobs.iter().map(|job| job.total_time).collect();
    if let Some(average) = mean(&times) {
        println!("\nAverage processing time: {:.2}s", average);
    }

    let efficiency = calculate_efficiency(&jobs);
    if !efficiency.phases.is_empty() {
        println!("\n{}", "Phase breakdown (successful jobs):".bold());
        for (phase, phase_efficiency) in &efficiency.phases {
            println!("  {}", render::phase_line(*phase, phase_efficiency));
        }
        println!(
            "  Throughput: {:.1} records/s",
            efficiency.overall_throughput
        );
    }

    let predictive = generate_predictive_insights(&jobs, &config.thresholds);
    let security = generate_security_insights(&jobs, &config.thresholds);
    let anomalies = detect_performance_anomalies(&jobs, &config.thresholds);

    println!("\n{}", "Insights:".bold());
    for insight in &predictive {
        println!("  {} {}", "▸".yellow(), render::predictive_line(insight));
    }
    for insight in &security {
        println!("  {} {}", "▸".cyan(), render::security_line(insight));
    }
    for anomaly in &anomalies {
        println!("  {} {}", "▸".red(), render::anomaly_line(anomaly));
    }

    Ok(())
}

pub fn handle_file_insight(table: &Path, name: &str, config: &Config) -> Result<()> {
    let jobs = store::read_jobs(table)?;
    let matches = matching_jobs(&jobs, name);

    if matches.is_empty() {
        println!("{}", format!("No jobs found for file '{}'.", name).yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Processing history for '{}' ({} attempt(s)):", name, matches.len()).bold()
    );
    for job in &matches {
        let when = job
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        println!(
            "  {} {} {} {:.2}s",
            when.dimmed(),
            job.file_name,
            render::colorize_status(&job.status),
            job.total_time
        );
    }

    let successes = matches.iter().filter(|job| job.is_success()).count();
    let errors = matches.iter().filter(|job| job.is_error()).count();
    println!("\n  Successes: {}", successes.to_string().green());
    println!("  Errors:    {}", errors.to_string().red());

    let times: Vec<f64> = matches.iter().map(|job| job.total_time).collect();
    if let Some(average) = mean(&times) {
        println!("  Average:   {:.2}s", average);
    }

    if let Some(last_error) = matches.iter().rev().find(|job| job.is_error()) {
        let detail = if last_error.error_message.is_empty() {
            last_error.error_type.as_str().to_string()
        } else {
            format!("{}: {}", last_error.error_type, last_error.error_message)
        };
        println!("  Last error: {}", detail.red());
    }

    let scores: Vec<String> = matches
        .iter()
        .filter(|job| job.is_success())
        .map(|job| quality_score(job, &config.thresholds).to_string())
        .collect();
    if !scores.is_empty() {
        println!("  Quality scores: {}", scores.join(", "));
    }

    Ok(())
}

fn status_counts(jobs: &[JobRecord]) -> Vec<(JobStatus, usize)> {
    [JobStatus::Success, JobStatus::Error, JobStatus::Incomplete]
        .into_iter()
        .map(|status| (status, jobs.iter().filter(|job| job.status == status).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn error_type_counts(jobs: &[JobRecord]) -> BTreeMap<ErrorType, usize> {
    let mut counts = BTreeMap::new();
    for job in jobs.iter().filter(|job| job.is_error()) {
        *counts.entry(job.error_type).or_insert(0) += 1;
    }
    counts
}

/// Jobs whose file name contains `name`, ignoring case
fn matching_jobs<'a>(jobs: &'a [JobRecord], name: &str) -> Vec<&'a JobRecord> {
    let needle = name.to_lowercase();
    jobs.iter()
        .filter(|job| job.file_name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(file: &str, status: JobStatus, error_type: ErrorType) -> JobRecord {
        JobRecord {
            file_name: file.to_string(),
            status,
            error_type,
            ..JobRecord::default()
        }
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let jobs = vec![
            job("Sales_2024.CSV", JobStatus::Success, ErrorType::None),
            job("inventory.xlsx", JobStatus::Error, ErrorType::CorruptedExcel),
        ];
        let found = matching_jobs(&jobs, "sales");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name, "Sales_2024.CSV");
        assert!(matching_jobs(&jobs, "missing").is_empty());
    }

    #[test]
    fn test_overview_counts() {
        let jobs = vec![
            job("a.csv", JobStatus::Success, ErrorType::None),
            job("b.csv", JobStatus::Error, ErrorType::QsvError),
            job("c.csv", JobStatus::Error, ErrorType::QsvError),
            job("d.xlsx", JobStatus::Error, ErrorType::CorruptedExcel),
        ];

        assert_eq!(
            status_counts(&jobs),
            vec![(JobStatus::Success, 1), (JobStatus::Error, 3)]
        );

        let errors = error_type_counts(&jobs);
        assert_eq!(errors.get(&ErrorType::QsvError), Some(&2));
        assert_eq!(errors.get(&ErrorType::CorruptedExcel), Some(&1));
        assert_eq!(errors.get(&ErrorType::None), None);
    }
}

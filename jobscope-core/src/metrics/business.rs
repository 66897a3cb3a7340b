//! Business and SLA metrics

use crate::config::Thresholds;
use crate::domain::job::JobRecord;
use crate::domain::metrics::BusinessMetrics;
use crate::metrics::{quality, stats};

pub fn generate_business_metrics(jobs: &[JobRecord], thresholds: &Thresholds) -> BusinessMetrics {
    let successful: Vec<&JobRecord> = jobs.iter().filter(|job| job.is_success()).collect();

    let total_records: u64 = successful.iter().map(|job| job.records).sum();
    let processing_time: f64 = successful.iter().map(|job| job.total_time).sum();

    let scores = quality::successful_scores(jobs, thresholds);
    let scores_f64: Vec<f64> = scores.iter().copied().map(f64::from).collect();
    let meeting_sla = scores
        .iter()
        .filter(|score| **score >= thresholds.quality_sla_score)
        .count();

    BusinessMetrics {
        system_availability: availability(jobs),
        mttr: mean_time_to_recovery(jobs),
        data_pipeline_efficiency: stats::ratio(total_records as f64, processing_time),
        estimated_cost: estimate_processing_cost(processing_time, thresholds),
        avg_data_quality: stats::mean(&scores_f64).unwrap_or(0.0),
        quality_sla_compliance: stats::ratio(meeting_sla as f64, scores.len() as f64),
    }
}

/// Fraction of jobs that succeeded, zero for an empty set
pub fn availability(jobs: &[JobRecord]) -> f64 {
    let successful = jobs.iter().filter(|job| job.is_success()).count();
    stats::ratio(successful as f64, jobs.len() as f64)
}

/// Mean total time of failed jobs
///
/// There is no recovery event in the log, so the failure duration stands in
/// for time to recovery.
pub fn mean_time_to_recovery(jobs: &[JobRecord]) -> f64 {
    let times: Vec<f64> = jobs
        .iter()
        .filter(|job| job.is_error())
        .map(|job| job.total_time)
        .collect();
    stats::mean(&times).unwrap_or(0.0)
}

/// Dollar cost of the given processing seconds at the configured CPU-hour rate
pub fn estimate_processing_cost(seconds: f64, thresholds: &Thresholds) -> f64 {
    seconds / 3600.0 * thresholds.cost_per_cpu_hour
}

/// Cost of all successful processing time
pub fn successful_processing_cost(jobs: &[JobRecord], thresholds: &Thresholds) -> f64 {
    let seconds: f64 = jobs
        .iter()
        .filter(|job| job.is_success())
        .map(|job| job.total_time)
        .sum();
    estimate_processing_cost(seconds, thresholds)
}

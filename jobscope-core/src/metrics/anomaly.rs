//! Performance anomaly detection

use crate::config::Thresholds;
use crate::domain::job::JobRecord;
use crate::domain::metrics::{AnomalyKind, PerformanceAnomaly};
use crate::metrics::stats;

/// Flag successful jobs whose total time exceeds `mean + k * stdev`
///
/// Statistics come from successful jobs only. Returns nothing when the
/// sample is too small, has no spread, or has a zero mean.
pub fn detect_performance_anomalies(
    jobs: &[JobRecord],
    thresholds: &Thresholds,
) -> Vec<PerformanceAnomaly> {
    let successful: Vec<&JobRecord> = jobs.iter().filter(|job| job.is_success()).collect();
    if successful.len() < thresholds.anomaly_min_samples {
        return Vec::new();
    }

    let times: Vec<f64> = successful.iter().map(|job| job.total_time).collect();
    let (Some(mean), Some(stdev)) = (stats::mean(&times), stats::sample_stdev(&times)) else {
        return Vec::new();
    };
    if stdev <= 0.0 || mean <= 0.0 {
        return Vec::new();
    }

    let threshold = mean + thresholds.anomaly_stdev_factor * stdev;

    let anomalies: Vec<PerformanceAnomaly> = successful
        .into_iter()
        .filter(|job| job.total_time > threshold)
        .map(|job| PerformanceAnomaly {
            file: job.file_name.clone(),
            job_id: job.job_id.clone(),
            actual_time: job.total_time,
            expected_time: mean,
            deviation_factor: job.total_time / mean,
            kind: AnomalyKind::SlowProcessing,
        })
        .collect();

    if !anomalies.is_empty() {
        tracing::debug!(
            "Found {} slow job(s) above {:.2}s (mean {:.2}s, stdev {:.2}s)",
            anomalies.len(),
            threshold,
            mean,
            stdev
        );
    }

    anomalies
}

//! Throughput and phase efficiency

use crate::domain::job::{JobRecord, Phase};
use crate::domain::metrics::{EfficiencyMetrics, JobEfficiency, PhaseEfficiency};
use crate::metrics::stats;

/// Throughput and per-phase breakdown over successful jobs
///
/// Phases are left empty when nothing succeeded.
pub fn calculate_efficiency(jobs: &[JobRecord]) -> EfficiencyMetrics {
    let successful: Vec<&JobRecord> = jobs.iter().filter(|job| job.is_success()).collect();
    if successful.is_empty() {
        return EfficiencyMetrics::default();
    }

    let total_records: u64 = successful.iter().map(|job| job.records).sum();
    let total_time: f64 = successful.iter().map(|job| job.total_time).sum();

    let phases = Phase::ALL
        .iter()
        .map(|phase| {
            let times: Vec<f64> = successful.iter().map(|job| job.phase_time(*phase)).collect();
            let phase_total: f64 = times.iter().sum();
            let efficiency = PhaseEfficiency {
                average: stats::mean(&times).unwrap_or(0.0),
                share_percent: stats::ratio(phase_total, total_time) * 100.0,
            };
            (*phase, efficiency)
        })
        .collect();

    EfficiencyMetrics {
        overall_throughput: stats::ratio(total_records as f64, total_time),
        phases,
    }
}

/// Per-job throughput for a successful job with records and a duration
pub fn job_efficiency(job: &JobRecord) -> Option<JobEfficiency> {
    if !job.is_success() || job.records == 0 || job.total_time <= 0.0 {
        return None;
    }
    let records = job.records as f64;
    let time_per_1k_records = if job.records >= 1000 {
        job.total_time / (records / 1000.0)
    } else {
        job.total_time
    };
    Some(JobEfficiency {
        records_per_second: records / job.total_time,
        time_per_1k_records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::JobStatus;

    fn success(records: u64, total: f64, download: f64, copying: f64) -> JobRecord {
        JobRecord {
            job_id: "id".to_string(),
            status: JobStatus::Success,
            records,
            total_time: total,
            download_time: download,
            copying_time: copying,
            ..JobRecord::default()
        }
    }

    #[test]
    fn test_no_successes_is_neutral() {
        let failed = JobRecord {
            status: JobStatus::Error,
            total_time: 5.0,
            ..JobRecord::default()
        };
        let metrics = calculate_efficiency(&[failed]);
        assert_eq!(metrics.overall_throughput, 0.0);
        assert!(metrics.phases.is_empty());
        assert_eq!(calculate_efficiency(&[]), EfficiencyMetrics::default());
    }

    #[test]
    fn test_throughput_and_phase_share() {
        let jobs = vec![success(1000, 10.0, 2.0, 5.0), success(3000, 10.0, 4.0, 5.0)];
        let metrics = calculate_efficiency(&jobs);

        assert_eq!(metrics.overall_throughput, 200.0);
        let download = metrics.phases[&Phase::Download];
        assert_eq!(download.average, 3.0);
        assert!((download.share_percent - 30.0).abs() < 1e-9);
        let copying = metrics.phases[&Phase::Copying];
        assert!((copying.share_percent - 50.0).abs() < 1e-9);
        assert_eq!(metrics.phases.len(), 6);
    }

    #[test]
    fn test_zero_total_time_has_zero_share() {
        let metrics = calculate_efficiency(&[success(10, 0.0, 0.0, 0.0)]);
        assert_eq!(metrics.overall_throughput, 0.0);
        assert_eq!(metrics.phases[&Phase::Download].share_percent, 0.0);
    }

    #[test]
    fn test_job_efficiency() {
        let efficiency = job_efficiency(&success(2000, 4.0, 0.0, 0.0)).unwrap();
        assert_eq!(efficiency.records_per_second, 500.0);
        assert_eq!(efficiency.time_per_1k_records, 2.0);

        let small = job_efficiency(&success(10, 4.0, 0.0, 0.0)).unwrap();
        assert_eq!(small.time_per_1k_records, 4.0);

        assert!(job_efficiency(&success(0, 4.0, 0.0, 0.0)).is_none());
        assert!(job_efficiency(&success(10, 0.0, 0.0, 0.0)).is_none());
    }
}

//! Report assembly
//!
//! Builds the executive summary and per-job scoring from metrics engine
//! outputs.

use crate::config::Thresholds;
use crate::domain::job::JobRecord;
use crate::domain::report::{ExecutiveSummary, QualityGrade, ScoredJob, SystemHealth};
use crate::metrics::{business, efficiency, quality, stats};

/// Summarise overall health, volume, cost and quality
pub fn executive_summary(jobs: &[JobRecord], thresholds: &Thresholds) -> ExecutiveSummary {
    let availability = business::availability(jobs);
    let successful: Vec<&JobRecord> = jobs.iter().filter(|job| job.is_success()).collect();
    let times: Vec<f64> = successful.iter().map(|job| job.total_time).collect();
    let cost = business::successful_processing_cost(jobs, thresholds);

    ExecutiveSummary {
        system_health: system_health(availability, thresholds),
        availability_sla: availability * 100.0,
        total_data_processed: successful.iter().map(|job| job.records).sum(),
        average_processing_time: stats::mean(&times),
        cost_efficiency_score: (100.0 - cost * 1000.0).clamp(0.0, 100.0),
        data_quality_grade: quality_grade(jobs, thresholds),
        key_recommendations: top_recommendations(jobs, thresholds),
    }
}

/// Health classification from the success fraction
pub fn system_health(availability: f64, thresholds: &Thresholds) -> SystemHealth {
    if availability >= thresholds.healthy_availability {
        SystemHealth::Healthy
    } else if availability >= thresholds.degraded_availability {
        SystemHealth::Degraded
    } else {
        SystemHealth::Critical
    }
}

/// Letter grade of the mean quality score; F when nothing succeeded
pub fn quality_grade(jobs: &[JobRecord], thresholds: &Thresholds) -> QualityGrade {
    match quality::mean_quality_score(jobs, thresholds) {
        Some(score) if score >= 90.0 => QualityGrade::A,
        Some(score) if score >= 80.0 => QualityGrade::B,
        Some(score) if score >= 70.0 => QualityGrade::C,
        Some(score) if score >= 60.0 => QualityGrade::D,
        _ => QualityGrade::F,
    }
}

/// Up to `max_recommendations` actions driven by error rate, speed and quality
pub fn top_recommendations(jobs: &[JobRecord], thresholds: &Thresholds) -> Vec<String> {
    let mut recommendations = Vec::new();

    let errors = jobs.iter().filter(|job| job.is_error()).count();
    if stats::ratio(errors as f64, jobs.len() as f64) > thresholds.recommend_error_rate {
        recommendations.push(format!(
            "Implement pre-processing validation to reduce {:.0}%+ failure rate",
            thresholds.recommend_error_rate * 100.0
        ));
    }

    let times: Vec<f64> = jobs
        .iter()
        .filter(|job| job.is_success())
        .map(|job| job.total_time)
        .collect();
    if let Some(avg_time) = stats::mean(&times)
        .filter(|avg| *avg > thresholds.recommend_avg_time_secs)
    {
        tracing::debug!("Average processing time {:.2}s over target", avg_time);
        recommendations.push(format!(
            "Optimize processing pipeline - average {}+ second processing time",
            thresholds.recommend_avg_time_secs
        ));
    }

    if quality::mean_quality_score(jobs, thresholds)
        .is_some_and(|avg| avg < thresholds.recommend_quality_score)
    {
        recommendations.push(format!(
            "Implement data quality gates - current average below {}%",
            thresholds.recommend_quality_score
        ));
    }

    recommendations.truncate(thresholds.max_recommendations);
    recommendations
}

/// Attach quality score and records-per-second to each successful job
pub fn score_jobs(jobs: &[JobRecord], thresholds: &Thresholds) -> Vec<ScoredJob> {
    jobs.iter()
        .filter(|job| job.is_success())
        .map(|job| ScoredJob {
            record: job.clone(),
            data_quality_score: quality::quality_score(job, thresholds),
            processing_efficiency: stats::ratio(job.records as f64, job.total_time),
            efficiency: efficiency::job_efficiency(job),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::{Flag, JobStatus};

    fn job(status: JobStatus, total_time: f64, valid: bool) -> JobRecord {
        JobRecord {
            job_id: "id".to_string(),
            status,
            records: 100,
            total_time,
            valid_csv: if valid { Flag::True } else { Flag::False },
            normalized: "Successful".to_string(),
            analysis: "Successful".to_string(),
            ..JobRecord::default()
        }
    }

    #[test]
    fn test_all_successful_is_healthy() {
        let jobs = vec![
            job(JobStatus::Success, 1.0, true),
            job(JobStatus::Success, 2.0, true),
        ];
        let summary = executive_summary(&jobs, &Thresholds::default());
        assert_eq!(summary.system_health, SystemHealth::Healthy);
        assert_eq!(summary.availability_sla, 100.0);
        assert_eq!(summary.total_data_processed, 200);
        assert_eq!(summary.average_processing_time, Some(1.5));
        assert_eq!(summary.data_quality_grade, QualityGrade::A);
        assert!(summary.key_recommendations.is_empty());
        assert!(summary.cost_efficiency_score > 99.0);
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let summary = executive_summary(&[], &Thresholds::default());
        assert_eq!(summary.system_health, SystemHealth::Critical);
        assert_eq!(summary.availability_sla, 0.0);
        assert_eq!(summary.average_processing_time, None);
        assert_eq!(summary.data_quality_grade, QualityGrade::F);
        assert!(summary.key_recommendations.is_empty());
        assert_eq!(summary.cost_efficiency_score, 100.0);
    }

    #[test]
    fn test_health_bands() {
        let thresholds = Thresholds::default();
        assert_eq!(system_health(0.95, &thresholds), SystemHealth::Healthy);
        assert_eq!(system_health(0.80, &thresholds), SystemHealth::Degraded);
        assert_eq!(system_health(0.79, &thresholds), SystemHealth::Critical);
    }

    #[test]
    fn test_quality_grades() {
        let thresholds = Thresholds::default();
        assert_eq!(
            quality_grade(&[job(JobStatus::Success, 1.0, false)], &thresholds),
            QualityGrade::C
        );
        assert_eq!(
            quality_grade(&[job(JobStatus::Error, 1.0, true)], &thresholds),
            QualityGrade::F
        );
    }

    #[test]
    fn test_all_recommendations() {
        let jobs = vec![
            job(JobStatus::Success, 10.0, false),
            job(JobStatus::Error, 1.0, false),
        ];
        let summary = executive_summary(&jobs, &Thresholds::default());
        assert_eq!(summary.system_health, SystemHealth::Critical);
        assert_eq!(summary.key_recommendations.len(), 3);
        assert!(summary.key_recommendations[0].contains("10%+"));
        assert!(summary.key_recommendations[1].contains("5+ second"));
        assert!(summary.key_recommendations[2].contains("below 80%"));
    }

    #[test]
    fn test_score_jobs_keeps_record() {
        let jobs = vec![
            job(JobStatus::Success, 4.0, true),
            job(JobStatus::Error, 1.0, true),
        ];
        let scored = score_jobs(&jobs, &Thresholds::default());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].record, jobs[0]);
        assert_eq!(scored[0].data_quality_score, 100);
        assert_eq!(scored[0].processing_efficiency, 25.0);
    }

    #[test]
    fn test_score_jobs_attaches_throughput() {
        let mut large = job(JobStatus::Success, 4.0, true);
        large.records = 2000;
        let mut empty = job(JobStatus::Success, 4.0, true);
        empty.records = 0;

        let scored = score_jobs(
            &[job(JobStatus::Success, 4.0, true), large, empty],
            &Thresholds::default(),
        );

        let small = scored[0].efficiency.unwrap();
        assert_eq!(small.records_per_second, 25.0);
        assert_eq!(small.time_per_1k_records, 4.0);

        let large = scored[1].efficiency.unwrap();
        assert_eq!(large.records_per_second, 500.0);
        assert_eq!(large.time_per_1k_records, 2.0);

        assert!(scored[2].efficiency.is_none());

        let json = serde_json::to_value(&scored[1]).unwrap();
        assert_eq!(json["efficiency"]["records_per_second"], 500.0);
        assert_eq!(json["efficiency"]["time_per_1k_records"], 2.0);
    }
}

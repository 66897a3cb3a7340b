//! Predictive insights
//!
//! Looks for risky file formats, slowdowns over the run and low data quality.

use std::collections::BTreeMap;

use crate::config::Thresholds;
use crate::domain::job::JobRecord;
use crate::domain::metrics::PredictiveInsight;
use crate::metrics::{quality, stats};

pub fn generate_predictive_insights(
    jobs: &[JobRecord],
    thresholds: &Thresholds,
) -> Vec<PredictiveInsight> {
    let mut insights = high_risk_formats(jobs, thresholds);

    if let Some(insight) = performance_degradation(jobs, thresholds) {
        insights.push(insight);
    }

    if let Some(avg) = quality::mean_quality_score(jobs, thresholds)
        .filter(|avg| *avg < thresholds.quality_concern_score)
    {
        insights.push(PredictiveInsight::DataQualityConcern {
            avg_quality_score: avg,
            recommendation:
                "Multiple data quality issues detected - implement data validation pipeline"
                    .to_string(),
        });
    }

    insights
}

/// Formats whose share of failed jobs exceeds the high-risk rate
fn high_risk_formats(jobs: &[JobRecord], thresholds: &Thresholds) -> Vec<PredictiveInsight> {
    let mut totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for job in jobs {
        let entry = totals.entry(job.file_format.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if job.is_error() {
            entry.1 += 1;
        }
    }

    totals
        .into_iter()
        .filter(|(_, (_, errors))| *errors > 0)
        .filter_map(|(format, (total, errors))| {
            let failure_rate = errors as f64 / total as f64;
            (failure_rate > thresholds.high_risk_failure_rate).then(|| {
                PredictiveInsight::HighRiskFormat {
                    format: format.to_string(),
                    failure_rate,
                    recommendation: format!(
                        "Review {} file processing pipeline - {:.1}% failure rate detected",
                        format,
                        failure_rate * 100.0
                    ),
                }
            })
        })
        .collect()
}

/// Compare mean total time of the early and late halves of successful jobs
///
/// Input order is treated as arrival order.
fn performance_degradation(
    jobs: &[JobRecord],
    thresholds: &Thresholds,
) -> Option<PredictiveInsight> {
    let times: Vec<f64> = jobs
        .iter()
        .filter(|job| job.is_success())
        .map(|job| job.total_time)
        .collect();
    if times.len() < thresholds.degradation_min_samples.max(2) {
        return None;
    }

    let (first, second) = times.split_at(times.len() / 2);
    let avg_first = stats::mean(first)?;
    let avg_second = stats::mean(second)?;
    if avg_first <= 0.0 {
        return None;
    }

    (avg_second > avg_first * thresholds.degradation_ratio).then(|| {
        PredictiveInsight::PerformanceDegradation {
            degradation_factor: avg_second / avg_first,
            recommendation:
                "System performance degrading over time - investigate resource constraints"
                    .to_string(),
        }
    })
}

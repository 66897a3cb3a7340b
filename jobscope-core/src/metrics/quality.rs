//! Data quality scoring
//!
//! A fixed rubric: start at 100, subtract penalties for failed validation
//! steps, add small bonuses, clamp to 0-100.

use crate::config::Thresholds;
use crate::domain::job::{Flag, JobRecord};
use crate::metrics::stats;

const SUCCESSFUL: &str = "Successful";

/// Quality score for a single job, in `0..=100`
pub fn quality_score(job: &JobRecord, thresholds: &Thresholds) -> u8 {
    let mut score: i32 = 100;

    if job.valid_csv != Flag::True {
        score -= thresholds.invalid_csv_penalty;
    }
    if job.sorted == Flag::False {
        score -= thresholds.unsorted_penalty;
    }
    if let Some(unsafe_count) = job.unsafe_header_count() {
        let penalty = i64::from(unsafe_count) * i64::from(thresholds.unsafe_header_penalty);
        score -= penalty.min(i64::from(thresholds.unsafe_header_penalty_cap)) as i32;
    }
    if job.normalized != SUCCESSFUL {
        score -= thresholds.normalization_penalty;
    }
    if job.analysis != SUCCESSFUL {
        score -= thresholds.analysis_penalty;
    }

    if job.is_utf8() {
        score += thresholds.utf8_bonus;
    }
    if job.records > thresholds.large_file_records {
        score += thresholds.large_file_bonus;
    }

    score.clamp(0, 100) as u8
}

/// Scores of every successful job, in input order
pub fn successful_scores(jobs: &[JobRecord], thresholds: &Thresholds) -> Vec<u8> {
    jobs.iter()
        .filter(|job| job.is_success())
        .map(|job| quality_score(job, thresholds))
        .collect()
}

/// Mean score over successful jobs, `None` when there are none
pub fn mean_quality_score(jobs: &[JobRecord], thresholds: &Thresholds) -> Option<f64> {
    let scores: Vec<f64> = successful_scores(jobs, thresholds)
        .into_iter()
        .map(f64::from)
        .collect();
    stats::mean(&scores)
}

//! Failure pattern analysis
//!
//! Buckets error records by format, hour, size and file name, and finds
//! bursts of errors that happened close together.

use chrono::{NaiveDateTime, Timelike};
use std::collections::BTreeMap;

use crate::config::Thresholds;
use crate::domain::job::JobRecord;
use crate::domain::metrics::FailurePatterns;

pub fn analyze_failure_patterns(jobs: &[JobRecord], thresholds: &Thresholds) -> FailurePatterns {
    let errors: Vec<&JobRecord> = jobs.iter().filter(|job| job.is_error()).collect();
    let mut patterns = FailurePatterns::default();

    for job in &errors {
        bump(&mut patterns.by_file_format, &job.file_format);

        if let Some(ts) = job.timestamp {
            bump(&mut patterns.by_time_of_day, &hour_bucket(&ts));
        }

        bump(
            &mut patterns.by_file_size_proxy,
            size_bucket(job.records, thresholds),
        );
        bump(&mut patterns.recurring_files, &job.file_name);
    }

    let mut timestamps: Vec<NaiveDateTime> = errors.iter().filter_map(|job| job.timestamp).collect();
    timestamps.sort();
    patterns.sequential_failures = sequential_runs(&timestamps, thresholds.sequential_window_secs);

    patterns
}

fn bump(counter: &mut BTreeMap<String, usize>, key: &str) {
    *counter.entry(key.to_string()).or_insert(0) += 1;
}

/// Hour-of-day label such as `"14:00-14:59"`
pub fn hour_bucket(ts: &NaiveDateTime) -> String {
    format!("{:02}:00-{:02}:59", ts.hour(), ts.hour())
}

/// Size class using the record count as a proxy for file size
pub fn size_bucket(records: u64, thresholds: &Thresholds) -> &'static str {
    if records < thresholds.small_file_records {
        "small"
    } else if records < thresholds.medium_file_records {
        "medium"
    } else {
        "large"
    }
}

/// Lengths of runs of timestamps whose consecutive gaps stay under the window
///
/// Input must be sorted ascending. Isolated failures are not reported. A run
/// still open when the input ends is reported like one closed by a gap.
pub fn sequential_runs(sorted: &[NaiveDateTime], window_secs: i64) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut consecutive = 0usize;

    for pair in sorted.windows(2) {
        let gap = (pair[1] - pair[0]).num_seconds();
        if gap < window_secs {
            consecutive += 1;
        } else {
            if consecutive > 0 {
                runs.push(consecutive + 1);
            }
            consecutive = 0;
        }
    }
    if consecutive > 0 {
        runs.push(consecutive + 1);
    }

    runs
}

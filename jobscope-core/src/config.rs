//! Analytics thresholds
//!
//! Every weight, cutoff and rate the metrics engine applies lives here so it
//! can be tuned in one place.

use crate::error::{ConfigError, Result};

/// Tunable policy constants for scoring and reporting
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Quality penalty when the CSV was not confirmed valid
    pub invalid_csv_penalty: i32,
    /// Quality penalty when the file was reported unsorted
    pub unsorted_penalty: i32,
    /// Quality penalty per unsafe header
    pub unsafe_header_penalty: i32,
    /// Cap on the total unsafe-header penalty
    pub unsafe_header_penalty_cap: i32,
    pub normalization_penalty: i32,
    pub analysis_penalty: i32,
    pub utf8_bonus: i32,
    pub large_file_bonus: i32,
    /// Record count above which the large-file bonus applies
    pub large_file_records: u64,

    /// Minimum successful jobs before anomaly detection runs
    pub anomaly_min_samples: usize,
    /// Standard deviations above the mean that mark a slow job
    pub anomaly_stdev_factor: f64,

    /// Upper bound (exclusive) of the "small" size bucket
    pub small_file_records: u64,
    /// Upper bound (exclusive) of the "medium" size bucket
    pub medium_file_records: u64,
    /// Maximum gap between errors in the same burst
    pub sequential_window_secs: i64,

    /// Per-format error rate above which a format is flagged as risky
    pub high_risk_failure_rate: f64,
    /// Minimum successful jobs before comparing early and late halves
    pub degradation_min_samples: usize,
    /// Late/early mean time ratio above which degradation is reported
    pub degradation_ratio: f64,
    /// Mean quality below which a data quality concern is raised
    pub quality_concern_score: f64,

    /// Dollars per CPU hour used by the cost estimate
    pub cost_per_cpu_hour: f64,
    /// Quality score a job must reach to meet the SLA
    pub quality_sla_score: u8,

    /// Times the same file may be processed before it looks suspicious
    pub repeat_processing_limit: usize,

    /// Success fraction required for a healthy system
    pub healthy_availability: f64,
    /// Success fraction required for a degraded (not critical) system
    pub degraded_availability: f64,
    /// Error fraction above which validation is recommended
    pub recommend_error_rate: f64,
    /// Mean seconds above which pipeline optimisation is recommended
    pub recommend_avg_time_secs: f64,
    /// Mean quality below which quality gates are recommended
    pub recommend_quality_score: f64,
    pub max_recommendations: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            invalid_csv_penalty: 30,
            unsorted_penalty: 10,
            unsafe_header_penalty: 5,
            unsafe_header_penalty_cap: 25,
            normalization_penalty: 20,
            analysis_penalty: 25,
            utf8_bonus: 5,
            large_file_bonus: 5,
            large_file_records: 1000,
            anomaly_min_samples: 3,
            anomaly_stdev_factor: 2.0,
            small_file_records: 100,
            medium_file_records: 10_000,
            sequential_window_secs: 300,
            high_risk_failure_rate: 0.3,
            degradation_min_samples: 6,
            degradation_ratio: 1.3,
            quality_concern_score: 80.0,
            cost_per_cpu_hour: 0.10,
            quality_sla_score: 85,
            repeat_processing_limit: 5,
            healthy_availability: 0.95,
            degraded_availability: 0.80,
            recommend_error_rate: 0.10,
            recommend_avg_time_secs: 5.0,
            recommend_quality_score: 80.0,
            max_recommendations: 3,
        }
    }
}

impl Thresholds {
    /// Validates the thresholds
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("high_risk_failure_rate", self.high_risk_failure_rate),
            ("healthy_availability", self.healthy_availability),
            ("degraded_availability", self.degraded_availability),
            ("recommend_error_rate", self.recommend_error_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }

        if self.sequential_window_secs <= 0 {
            return Err(ConfigError::NotPositive {
                name: "sequential_window_secs",
            });
        }

        if self.cost_per_cpu_hour.is_nan() || self.cost_per_cpu_hour < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "cost_per_cpu_hour",
            });
        }

        if self.degradation_ratio <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "degradation_ratio",
            });
        }

        if self.anomaly_min_samples < 2 {
            // Sample standard deviation needs at least two points
            return Err(ConfigError::NotPositive {
                name: "anomaly_min_samples",
            });
        }

        if self.small_file_records >= self.medium_file_records {
            return Err(ConfigError::BucketOrder {
                small: self.small_file_records,
                medium: self.medium_file_records,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.invalid_csv_penalty, 30);
        assert_eq!(thresholds.sequential_window_secs, 300);
        assert!(thresholds.validate().is_ok());
    }

    #[test]
    fn test_thresholds_validation() {
        let mut thresholds = Thresholds::default();

        thresholds.high_risk_failure_rate = 1.5;
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::RateOutOfRange { .. })
        ));
        thresholds.high_risk_failure_rate = 0.3;

        thresholds.sequential_window_secs = 0;
        assert!(thresholds.validate().is_err());
        thresholds.sequential_window_secs = 300;

        thresholds.cost_per_cpu_hour = -1.0;
        assert!(thresholds.validate().is_err());
        thresholds.cost_per_cpu_hour = 0.10;

        thresholds.small_file_records = 20_000;
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::BucketOrder { .. })
        ));
        thresholds.small_file_records = 100;

        assert!(thresholds.validate().is_ok());
    }
}

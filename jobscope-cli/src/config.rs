//! Configuration module
//!
//! Builds the analytics thresholds from defaults plus command-line or
//! environment overrides.

use anyhow::Context;
use jobscope_core::Thresholds;

/// Threshold overrides collected from flags or `JOBSCOPE_*` variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cost_per_cpu_hour: Option<f64>,
    pub high_risk_failure_rate: Option<f64>,
    pub sequential_window_secs: Option<i64>,
    pub quality_sla: Option<u8>,
    pub repeat_threshold: Option<usize>,
}

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Policy constants handed to every metric
    pub thresholds: Thresholds,
}

impl Config {
    /// Apply overrides on top of the default thresholds and validate the result
    pub fn from_overrides(overrides: Overrides) -> anyhow::Result<Self> {
        let mut thresholds = Thresholds::default();

        if let Some(rate) = overrides.cost_per_cpu_hour {
            thresholds.cost_per_cpu_hour = rate;
        }
        if let Some(rate) = overrides.high_risk_failure_rate {
            thresholds.high_risk_failure_rate = rate;
        }
        if let Some(secs) = overrides.sequential_window_secs {
            thresholds.sequential_window_secs = secs;
        }
        if let Some(score) = overrides.quality_sla {
            thresholds.quality_sla_score = score;
        }
        if let Some(limit) = overrides.repeat_threshold {
            thresholds.repeat_processing_limit = limit;
        }

        thresholds
            .validate()
            .context("Invalid analytics configuration")?;

        tracing::debug!("Using thresholds: {:?}", thresholds);

        Ok(Self { thresholds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::from_overrides(Overrides::default()).unwrap();
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn test_overrides_applied() {
        let config = Config::from_overrides(Overrides {
            cost_per_cpu_hour: Some(0.5),
            sequential_window_secs: Some(60),
            repeat_threshold: Some(2),
            ..Overrides::default()
        })
        .unwrap();

        assert_eq!(config.thresholds.cost_per_cpu_hour, 0.5);
        assert_eq!(config.thresholds.sequential_window_secs, 60);
        assert_eq!(config.thresholds.repeat_processing_limit, 2);
        assert_eq!(config.thresholds.quality_sla_score, 85);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = Config::from_overrides(Overrides {
            high_risk_failure_rate: Some(3.0),
            ..Overrides::default()
        });
        assert!(result.is_err());

        let result = Config::from_overrides(Overrides {
            sequential_window_secs: Some(0),
            ..Overrides::default()
        });
        assert!(result.is_err());
    }
}

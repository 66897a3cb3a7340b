//! Metric output types
//!
//! Every structure here is derived from a slice of `JobRecord`s and
//! recomputed from scratch on each run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::job::Phase;

/// Kind of performance anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    SlowProcessing,
}

/// A successful job whose total time sits far above its peers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnomaly {
    pub file: String,
    pub job_id: String,
    pub actual_time: f64,
    pub expected_time: f64,
    pub deviation_factor: f64,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
}

/// Error counts bucketed along several dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailurePatterns {
    pub by_file_format: BTreeMap<String, usize>,
    pub by_time_of_day: BTreeMap<String, usize>,
    pub by_file_size_proxy: BTreeMap<String, usize>,
    /// Sizes of bursts of errors close together in time
    pub sequential_failures: Vec<usize>,
    pub recurring_files: BTreeMap<String, usize>,
}

/// Average duration and share of total time for one phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseEfficiency {
    pub average: f64,
    pub share_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    /// Records per second across all successful jobs
    pub overall_throughput: f64,
    pub phases: BTreeMap<Phase, PhaseEfficiency>,
}

/// Per-job throughput figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobEfficiency {
    pub records_per_second: f64,
    pub time_per_1k_records: f64,
}

/// Forward-looking findings derived from failure and timing trends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictiveInsight {
    HighRiskFormat {
        format: String,
        failure_rate: f64,
        recommendation: String,
    },
    PerformanceDegradation {
        degradation_factor: f64,
        recommendation: String,
    },
    DataQualityConcern {
        avg_quality_score: f64,
        recommendation: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessMetrics {
    /// Fraction of jobs that succeeded
    pub system_availability: f64,
    /// Mean total time of failed jobs, in seconds
    pub mttr: f64,
    pub data_pipeline_efficiency: f64,
    pub estimated_cost: f64,
    pub avg_data_quality: f64,
    /// Fraction of successful jobs meeting the quality SLA
    pub quality_sla_compliance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuspiciousPattern {
    RepeatedFileProcessing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityInsight {
    SuspiciousActivity {
        pattern: SuspiciousPattern,
        file: String,
        count: usize,
        recommendation: String,
    },
    ComplianceScore {
        score: f64,
        encoding_compliance: f64,
        header_safety_compliance: f64,
    },
}

//! Report domain types

use serde::{Deserialize, Serialize};

use crate::domain::job::JobRecord;
use crate::domain::metrics::JobEfficiency;

/// Overall health classification of the import pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemHealth {
    Healthy,
    Degraded,
    Critical,
}

impl std::fmt::Display for SystemHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemHealth::Healthy => write!(f, "HEALTHY"),
            SystemHealth::Degraded => write!(f, "DEGRADED"),
            SystemHealth::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Letter grade for mean data quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
            QualityGrade::D => "D",
            QualityGrade::F => "F",
        };
        write!(f, "{}", letter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub system_health: SystemHealth,
    /// Success percentage, 0-100
    pub availability_sla: f64,
    /// Records imported by successful jobs
    pub total_data_processed: u64,
    /// Mean total time of successful jobs, absent when none succeeded
    pub average_processing_time: Option<f64>,
    pub cost_efficiency_score: f64,
    pub data_quality_grade: QualityGrade,
    pub key_recommendations: Vec<String>,
}

/// A successful job together with its derived figures
///
/// The parsed record is carried unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredJob {
    pub record: JobRecord,
    pub data_quality_score: u8,
    pub processing_efficiency: f64,
    /// Throughput figures, absent without records or a duration
    pub efficiency: Option<JobEfficiency>,
}

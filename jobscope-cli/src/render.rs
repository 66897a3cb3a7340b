//! Text rendering for command output
//!
//! Formatters return plain strings; colouring is applied by the command
//! handlers at print time.

use colored::{ColoredString, Colorize};
use jobscope_core::JobStatus;
use jobscope_core::domain::job::Phase;
use jobscope_core::domain::metrics::{
    BusinessMetrics, PerformanceAnomaly, PhaseEfficiency, PredictiveInsight, SecurityInsight,
    SuspiciousPattern,
};

pub fn anomaly_line(anomaly: &PerformanceAnomaly) -> String {
    format!(
        "ANOMALY: {} took {:.2}s ({:.1}x expected)",
        anomaly.file, anomaly.actual_time, anomaly.deviation_factor
    )
}

pub fn predictive_line(insight: &PredictiveInsight) -> String {
    match insight {
        PredictiveInsight::HighRiskFormat {
            format,
            failure_rate,
            recommendation,
        } => format!(
            "HIGH RISK FORMAT: {} fails {:.1}% of the time. {}",
            format,
            failure_rate * 100.0,
            recommendation
        ),
        PredictiveInsight::PerformanceDegradation {
            degradation_factor,
            recommendation,
        } => format!(
            "PERFORMANCE DEGRADATION: recent jobs {:.2}x slower. {}",
            degradation_factor, recommendation
        ),
        PredictiveInsight::DataQualityConcern {
            avg_quality_score,
            recommendation,
        } => format!(
            "DATA QUALITY CONCERN: average score {:.1}. {}",
            avg_quality_score, recommendation
        ),
    }
}

pub fn security_line(insight: &SecurityInsight) -> String {
    match insight {
        SecurityInsight::SuspiciousActivity {
            pattern: SuspiciousPattern::RepeatedFileProcessing,
            file,
            count,
            recommendation,
        } => format!(
            "SUSPICIOUS ACTIVITY: {} processed {} times. {}",
            file, count, recommendation
        ),
        SecurityInsight::ComplianceScore {
            score,
            encoding_compliance,
            header_safety_compliance,
        } => format!(
            "COMPLIANCE: score {:.1} (encoding {:.1}%, header safety {:.1}%)",
            score, encoding_compliance, header_safety_compliance
        ),
    }
}

pub fn phase_line(phase: Phase, efficiency: &PhaseEfficiency) -> String {
    format!(
        "{:<10} {:.2}s avg ({:.1}% of total)",
        phase.as_str(),
        efficiency.average,
        efficiency.share_percent
    )
}

/// `metric: value` lines in field order, floats to three decimals
pub fn business_lines(metrics: &BusinessMetrics) -> Vec<String> {
    [
        ("system_availability", metrics.system_availability),
        ("mttr", metrics.mttr),
        ("data_pipeline_efficiency", metrics.data_pipeline_efficiency),
        ("estimated_cost", metrics.estimated_cost),
        ("avg_data_quality", metrics.avg_data_quality),
        ("quality_sla_compliance", metrics.quality_sla_compliance),
    ]
    .into_iter()
    .map(|(name, value)| format!("{}: {:.3}", name, value))
    .collect()
}

/// Colorize job status for display
pub fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Success => status_str.green(),
        JobStatus::Error => status_str.red(),
        JobStatus::Incomplete => status_str.yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscope_core::domain::metrics::AnomalyKind;

    #[test]
    fn test_anomaly_line() {
        let anomaly = PerformanceAnomaly {
            file: "big.csv".to_string(),
            job_id: "abc".to_string(),
            actual_time: 100.0,
            expected_time: 10.0,
            deviation_factor: 10.0,
            kind: AnomalyKind::SlowProcessing,
        };
        assert_eq!(
            anomaly_line(&anomaly),
            "ANOMALY: big.csv took 100.00s (10.0x expected)"
        );
    }

    #[test]
    fn test_predictive_line() {
        let insight = PredictiveInsight::HighRiskFormat {
            format: "XLSX".to_string(),
            failure_rate: 0.5,
            recommendation: "Add validation".to_string(),
        };
        assert_eq!(
            predictive_line(&insight),
            "HIGH RISK FORMAT: XLSX fails 50.0% of the time. Add validation"
        );
    }

    #[test]
    fn test_security_line() {
        let insight = SecurityInsight::ComplianceScore {
            score: 75.0,
            encoding_compliance: 100.0,
            header_safety_compliance: 50.0,
        };
        assert_eq!(
            security_line(&insight),
            "COMPLIANCE: score 75.0 (encoding 100.0%, header safety 50.0%)"
        );
    }

    #[test]
    fn test_phase_line() {
        let efficiency = PhaseEfficiency {
            average: 0.5,
            share_percent: 12.345,
        };
        assert_eq!(
            phase_line(Phase::Copying, &efficiency),
            "copying    0.50s avg (12.3% of total)"
        );
    }

    #[test]
    fn test_business_lines() {
        let metrics = BusinessMetrics {
            system_availability: 0.5,
            estimated_cost: 0.000347,
            ..BusinessMetrics::default()
        };
        let lines = business_lines(&metrics);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "system_availability: 0.500");
        assert_eq!(lines[3], "estimated_cost: 0.000");
    }
}

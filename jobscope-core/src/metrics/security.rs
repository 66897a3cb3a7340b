//! Security and compliance insights

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::config::Thresholds;
use crate::domain::job::JobRecord;
use crate::domain::metrics::{SecurityInsight, SuspiciousPattern};
use crate::metrics::stats;

/// Flag files processed suspiciously often, then append the compliance score
///
/// The compliance score is always the last entry.
pub fn generate_security_insights(
    jobs: &[JobRecord],
    thresholds: &Thresholds,
) -> Vec<SecurityInsight> {
    let mut groups: BTreeMap<String, (&JobRecord, usize)> = BTreeMap::new();
    for job in jobs {
        groups
            .entry(content_signature(job))
            .or_insert((job, 0))
            .1 += 1;
    }

    let mut insights: Vec<SecurityInsight> = groups
        .into_values()
        .filter(|(_, count)| *count > thresholds.repeat_processing_limit)
        .map(|(first, count)| {
            tracing::warn!("File {} processed {} times", first.file_name, count);
            SecurityInsight::SuspiciousActivity {
                pattern: SuspiciousPattern::RepeatedFileProcessing,
                file: first.file_name.clone(),
                count,
                recommendation: "Investigate repeated processing of same file".to_string(),
            }
        })
        .collect();

    insights.push(compliance_score(jobs));
    insights
}

/// Hex SHA-256 of the file name and format
pub fn content_signature(job: &JobRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(job.file_name.as_bytes());
    hasher.update(job.file_format.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Average of UTF-8 and header-safety conformance, as percentages
pub fn compliance_score(jobs: &[JobRecord]) -> SecurityInsight {
    let total = jobs.len() as f64;
    let utf8 = jobs.iter().filter(|job| job.is_utf8()).count() as f64;
    let safe = jobs.iter().filter(|job| job.has_safe_headers()).count() as f64;

    let encoding_compliance = stats::ratio(utf8, total);
    let header_compliance = stats::ratio(safe, total);

    SecurityInsight::ComplianceScore {
        score: (encoding_compliance + header_compliance) / 2.0 * 100.0,
        encoding_compliance: encoding_compliance * 100.0,
        header_safety_compliance: header_compliance * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::ALL_HEADERS_SAFE;

    fn job(name: &str, encoding: &str, headers: &str) -> JobRecord {
        JobRecord {
            job_id: "id".to_string(),
            file_name: name.to_string(),
            file_format: "CSV".to_string(),
            encoding: encoding.to_string(),
            db_safe_headers: headers.to_string(),
            ..JobRecord::default()
        }
    }

    #[test]
    fn test_empty_input_has_zero_compliance() {
        let insights = generate_security_insights(&[], &Thresholds::default());
        assert_eq!(
            insights,
            vec![SecurityInsight::ComplianceScore {
                score: 0.0,
                encoding_compliance: 0.0,
                header_safety_compliance: 0.0,
            }]
        );
    }

    #[test]
    fn test_repeated_processing_flagged_above_limit() {
        let mut jobs: Vec<JobRecord> = (0..6).map(|_| job("same.csv", "", "")).collect();
        jobs.extend((0..5).map(|_| job("other.csv", "", "")));

        let insights = generate_security_insights(&jobs, &Thresholds::default());
        assert_eq!(insights.len(), 2);
        assert!(matches!(
            &insights[0],
            SecurityInsight::SuspiciousActivity { file, count: 6, .. } if file == "same.csv"
        ));
        assert!(matches!(
            insights.last(),
            Some(SecurityInsight::ComplianceScore { .. })
        ));
    }

    #[test]
    fn test_compliance_score() {
        let jobs = vec![
            job("a.csv", "UTF-8", ALL_HEADERS_SAFE),
            job("b.csv", "UTF-8", "2 unsafe headers"),
            job("c.csv", "LATIN-1", ALL_HEADERS_SAFE),
            job("d.csv", "", ""),
        ];
        assert_eq!(
            compliance_score(&jobs),
            SecurityInsight::ComplianceScore {
                score: 50.0,
                encoding_compliance: 50.0,
                header_safety_compliance: 50.0,
            }
        );
    }

    #[test]
    fn test_signature_depends_on_name_and_format() {
        let a = job("a.csv", "", "");
        let mut b = a.clone();
        assert_eq!(content_signature(&a), content_signature(&b));
        b.file_format = "XLSX".to_string();
        assert_ne!(content_signature(&a), content_signature(&b));
        assert_eq!(content_signature(&a).len(), 64);
    }
}

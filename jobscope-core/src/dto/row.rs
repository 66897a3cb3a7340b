//! Tabular job row
//!
//! Flat, all-text mirror of `JobRecord` used for the CSV table. Reading is
//! lenient: blank or malformed numbers become zero and unknown enum text is
//! mapped to a safe default, so a hand-edited table still loads.

use serde::{Deserialize, Serialize};

use crate::domain::job::{
    ErrorType, Flag, JobRecord, JobStatus, TIMESTAMP_FORMAT, UNKNOWN, UNKNOWN_FORMAT,
    timestamp_format,
};

/// Column names in table order
pub const COLUMNS: [&str; 23] = [
    "job_id",
    "file_name",
    "file_format",
    "status",
    "timestamp",
    "total_time",
    "download_time",
    "analysis_time",
    "copying_time",
    "indexing_time",
    "formulae_time",
    "metadata_time",
    "records",
    "rows_copied",
    "columns_indexed",
    "error_type",
    "error_message",
    "encoding",
    "valid_csv",
    "sorted",
    "db_safe_headers",
    "normalized",
    "analysis",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRow {
    pub job_id: String,
    pub file_name: String,
    pub file_format: String,
    pub status: String,
    pub timestamp: String,
    pub total_time: String,
    pub download_time: String,
    pub analysis_time: String,
    pub copying_time: String,
    pub indexing_time: String,
    pub formulae_time: String,
    pub metadata_time: String,
    pub records: String,
    pub rows_copied: String,
    pub columns_indexed: String,
    pub error_type: String,
    pub error_message: String,
    pub encoding: String,
    pub valid_csv: String,
    pub sorted: String,
    pub db_safe_headers: String,
    pub normalized: String,
    pub analysis: String,
}

fn seconds(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

fn count(raw: &str) -> u64 {
    let raw = raw.trim();
    raw.parse::<u64>()
        .ok()
        .or_else(|| {
            // Tables written by spreadsheet tools may carry "150.0"
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v as u64)
        })
        .unwrap_or(0)
}

fn or_placeholder(raw: String, placeholder: &str) -> String {
    if raw.trim().is_empty() {
        placeholder.to_string()
    } else {
        raw
    }
}

impl From<&JobRecord> for JobRow {
    fn from(record: &JobRecord) -> Self {
        Self {
            job_id: record.job_id.clone(),
            file_name: record.file_name.clone(),
            file_format: record.file_format.clone(),
            status: record.status.to_string(),
            timestamp: record
                .timestamp
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
            total_time: record.total_time.to_string(),
            download_time: record.download_time.to_string(),
            analysis_time: record.analysis_time.to_string(),
            copying_time: record.copying_time.to_string(),
            indexing_time: record.indexing_time.to_string(),
            formulae_time: record.formulae_time.to_string(),
            metadata_time: record.metadata_time.to_string(),
            records: record.records.to_string(),
            rows_copied: record.rows_copied.to_string(),
            columns_indexed: record.columns_indexed.to_string(),
            error_type: record.error_type.to_string(),
            error_message: record.error_message.clone(),
            encoding: record.encoding.clone(),
            valid_csv: record.valid_csv.to_string(),
            sorted: record.sorted.to_string(),
            db_safe_headers: record.db_safe_headers.clone(),
            normalized: record.normalized.clone(),
            analysis: record.analysis.clone(),
        }
    }
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        let status = JobStatus::parse_lenient(&row.status);
        let (error_type, error_message) = if status == JobStatus::Error {
            (ErrorType::parse_lenient(&row.error_type), row.error_message)
        } else {
            (ErrorType::None, String::new())
        };

        Self {
            job_id: or_placeholder(row.job_id, UNKNOWN),
            file_name: or_placeholder(row.file_name, UNKNOWN),
            file_format: or_placeholder(row.file_format, UNKNOWN_FORMAT),
            status,
            timestamp: timestamp_format::parse(&row.timestamp),
            total_time: seconds(&row.total_time),
            download_time: seconds(&row.download_time),
            analysis_time: seconds(&row.analysis_time),
            copying_time: seconds(&row.copying_time),
            indexing_time: seconds(&row.indexing_time),
            formulae_time: seconds(&row.formulae_time),
            metadata_time: seconds(&row.metadata_time),
            records: count(&row.records),
            rows_copied: count(&row.rows_copied),
            columns_indexed: count(&row.columns_indexed),
            error_type,
            error_message,
            encoding: row.encoding,
            valid_csv: Flag::parse_lenient(&row.valid_csv),
            sorted: Flag::parse_lenient(&row.sorted),
            db_safe_headers: row.db_safe_headers,
            normalized: row.normalized,
            analysis: row.analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JobRecord {
        JobRecord {
            job_id: "0b5e2f6a-3c1d-4e8f-9a7b-1c2d3e4f5a6b".to_string(),
            file_name: "sales.csv".to_string(),
            file_format: "CSV".to_string(),
            status: JobStatus::Error,
            timestamp: timestamp_format::parse("2024-03-01 10:15:00"),
            total_time: 12.345,
            download_time: 0.1,
            records: 150,
            rows_copied: 149,
            columns_indexed: 3,
            error_type: ErrorType::QsvError,
            error_message: String::new(),
            encoding: "UTF-8".to_string(),
            valid_csv: Flag::True,
            sorted: Flag::False,
            db_safe_headers: "2 unsafe headers".to_string(),
            normalized: "Successful".to_string(),
            analysis: "Failed".to_string(),
            ..JobRecord::default()
        }
    }

    #[test]
    fn test_row_conversion_preserves_fields() {
        let record = sample();
        let row = JobRow::from(&record);
        assert_eq!(row.status, "ERROR");
        assert_eq!(row.error_type, "QSV_ERROR");
        assert_eq!(row.timestamp, "2024-03-01 10:15:00");
        assert_eq!(JobRecord::from(row), record);
    }

    #[test]
    fn test_lenient_numeric_coercion() {
        let row = JobRow {
            job_id: "abc".to_string(),
            status: "SUCCESS".to_string(),
            total_time: "".to_string(),
            download_time: "oops".to_string(),
            records: "150.0".to_string(),
            rows_copied: "-3".to_string(),
            error_type: "QSV_ERROR".to_string(),
            ..JobRow::default()
        };
        let record = JobRecord::from(row);
        assert_eq!(record.total_time, 0.0);
        assert_eq!(record.download_time, 0.0);
        assert_eq!(record.records, 150);
        assert_eq!(record.rows_copied, 0);
        assert_eq!(record.file_name, UNKNOWN);
        assert_eq!(record.file_format, UNKNOWN_FORMAT);
        // error fields only survive on error rows
        assert_eq!(record.error_type, ErrorType::None);
    }

    #[test]
    fn test_columns_match_row_fields() {
        let value = serde_json::to_value(JobRow::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), COLUMNS.len());
        for column in COLUMNS {
            assert!(object.contains_key(column), "missing column {}", column);
        }
    }
}

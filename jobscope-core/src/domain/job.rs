//! Job record domain types
//!
//! A `JobRecord` is the canonical, immutable result of parsing one job block
//! out of the worker log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Placeholder used when the job id or file reference is missing from a block
pub const UNKNOWN: &str = "unknown";

/// Placeholder format for file names without an extension
pub const UNKNOWN_FORMAT: &str = "UNKNOWN";

/// Timestamp layout used by the worker log and the CSV table
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker text for a job whose headers passed the database-safety check
pub const ALL_HEADERS_SAFE: &str = "All headers safe";

/// Outcome of a single job run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Success,
    Error,
    #[default]
    Incomplete,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Success => "SUCCESS",
            JobStatus::Error => "ERROR",
            JobStatus::Incomplete => "INCOMPLETE",
        }
    }

    /// Lenient parse used when reloading tables; anything unrecognized is incomplete.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => JobStatus::Success,
            "ERROR" => JobStatus::Error,
            _ => JobStatus::Incomplete,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure classification for jobs with `JobStatus::Error`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// Not an error record
    #[default]
    #[serde(rename = "")]
    None,
    CorruptedExcel,
    QsvError,
    InvalidUrl,
    UnknownError,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::None => "",
            ErrorType::CorruptedExcel => "CORRUPTED_EXCEL",
            ErrorType::QsvError => "QSV_ERROR",
            ErrorType::InvalidUrl => "INVALID_URL",
            ErrorType::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Lenient parse used when reloading tables.
    ///
    /// Empty text means "no error"; unrecognized text is kept as an unknown error.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "" => ErrorType::None,
            "CORRUPTED_EXCEL" => ErrorType::CorruptedExcel,
            "QSV_ERROR" => ErrorType::QsvError,
            "INVALID_URL" => ErrorType::InvalidUrl,
            _ => ErrorType::UnknownError,
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Boolean validation outcome that may be missing from the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "TRUE")]
    True,
    #[serde(rename = "FALSE")]
    False,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::True => "TRUE",
            Flag::False => "FALSE",
            Flag::Unknown => "",
        }
    }

    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRUE" => Flag::True,
            "FALSE" => Flag::False,
            _ => Flag::Unknown,
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Processing phases timed by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Download,
    Analysis,
    Copying,
    Indexing,
    Formulae,
    Metadata,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Download,
        Phase::Analysis,
        Phase::Copying,
        Phase::Indexing,
        Phase::Formulae,
        Phase::Metadata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Download => "download",
            Phase::Analysis => "analysis",
            Phase::Copying => "copying",
            Phase::Indexing => "indexing",
            Phase::Formulae => "formulae",
            Phase::Metadata => "metadata",
        }
    }
}

/// One parsed job execution
///
/// Fields keep the order of the CSV table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub file_name: String,
    pub file_format: String,
    pub status: JobStatus,
    #[serde(with = "timestamp_format")]
    pub timestamp: Option<NaiveDateTime>,
    pub total_time: f64,
    pub download_time: f64,
    pub analysis_time: f64,
    pub copying_time: f64,
    pub indexing_time: f64,
    pub formulae_time: f64,
    pub metadata_time: f64,
    pub records: u64,
    pub rows_copied: u64,
    pub columns_indexed: u64,
    pub error_type: ErrorType,
    pub error_message: String,
    pub encoding: String,
    pub valid_csv: Flag,
    pub sorted: Flag,
    pub db_safe_headers: String,
    pub normalized: String,
    pub analysis: String,
}

impl Default for JobRecord {
    fn default() -> Self {
        Self {
            job_id: UNKNOWN.to_string(),
            file_name: UNKNOWN.to_string(),
            file_format: UNKNOWN_FORMAT.to_string(),
            status: JobStatus::Incomplete,
            timestamp: None,
            total_time: 0.0,
            download_time: 0.0,
            analysis_time: 0.0,
            copying_time: 0.0,
            indexing_time: 0.0,
            formulae_time: 0.0,
            metadata_time: 0.0,
            records: 0,
            rows_copied: 0,
            columns_indexed: 0,
            error_type: ErrorType::None,
            error_message: String::new(),
            encoding: String::new(),
            valid_csv: Flag::Unknown,
            sorted: Flag::Unknown,
            db_safe_headers: String::new(),
            normalized: String::new(),
            analysis: String::new(),
        }
    }
}

impl JobRecord {
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == JobStatus::Error
    }

    /// Whether the record carries enough identity to be worth keeping
    pub fn is_identified(&self) -> bool {
        self.job_id != UNKNOWN || self.file_name != UNKNOWN
    }

    pub fn is_utf8(&self) -> bool {
        self.encoding == "UTF-8"
    }

    pub fn has_safe_headers(&self) -> bool {
        self.db_safe_headers.contains(ALL_HEADERS_SAFE)
    }

    /// Number of unsafe headers reported, if the header check flagged any
    ///
    /// A flagged record without a count yields `Some(0)`; counts too large
    /// for `u32` saturate.
    pub fn unsafe_header_count(&self) -> Option<u32> {
        if !self.db_safe_headers.to_lowercase().contains("unsafe headers") {
            return None;
        }
        let digits: String = self
            .db_safe_headers
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return Some(0);
        }
        Some(digits.parse().unwrap_or(u32::MAX))
    }

    /// Seconds spent in a single processing phase
    pub fn phase_time(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Download => self.download_time,
            Phase::Analysis => self.analysis_time,
            Phase::Copying => self.copying_time,
            Phase::Indexing => self.indexing_time,
            Phase::Formulae => self.formulae_time,
            Phase::Metadata => self.metadata_time,
        }
    }
}

/// Serde adapter writing timestamps in the worker log layout, empty when absent
pub mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

    /// Parse a timestamp, treating blank or malformed text as absent
    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_unidentified() {
        let record = JobRecord::default();
        assert_eq!(record.job_id, UNKNOWN);
        assert_eq!(record.status, JobStatus::Incomplete);
        assert!(!record.is_identified());
    }

    #[test]
    fn test_unsafe_header_count() {
        let mut record = JobRecord::default();
        assert_eq!(record.unsafe_header_count(), None);

        record.db_safe_headers = "3 unsafe headers".to_string();
        assert_eq!(record.unsafe_header_count(), Some(3));

        record.db_safe_headers = "99999999999 unsafe headers".to_string();
        assert_eq!(record.unsafe_header_count(), Some(u32::MAX));

        record.db_safe_headers = ALL_HEADERS_SAFE.to_string();
        assert_eq!(record.unsafe_header_count(), None);
        assert!(record.has_safe_headers());
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!(JobStatus::parse_lenient("success"), JobStatus::Success);
        assert_eq!(JobStatus::parse_lenient("bogus"), JobStatus::Incomplete);
        assert_eq!(ErrorType::parse_lenient(""), ErrorType::None);
        assert_eq!(ErrorType::parse_lenient("QSV_ERROR"), ErrorType::QsvError);
        assert_eq!(ErrorType::parse_lenient("weird"), ErrorType::UnknownError);
        assert_eq!(Flag::parse_lenient("false"), Flag::False);
        assert_eq!(Flag::parse_lenient(""), Flag::Unknown);
    }

    #[test]
    fn test_status_json_names() {
        let json = serde_json::to_string(&JobStatus::Success).unwrap();
        assert_eq!(json, "\"SUCCESS\"");
        let json = serde_json::to_string(&ErrorType::CorruptedExcel).unwrap();
        assert_eq!(json, "\"CORRUPTED_EXCEL\"");
        let json = serde_json::to_string(&ErrorType::None).unwrap();
        assert_eq!(json, "\"\"");
    }

    #[test]
    fn test_timestamp_parse() {
        assert!(timestamp_format::parse("2024-03-01 10:15:00").is_some());
        assert!(timestamp_format::parse("").is_none());
        assert!(timestamp_format::parse("yesterday").is_none());
    }
}

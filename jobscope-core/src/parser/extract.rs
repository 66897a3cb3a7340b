//! Field extraction rules
//!
//! One small function per field. Each rule searches the block independently
//! and returns `None` when its pattern is missing or does not parse, leaving
//! defaults to the record builder.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

use crate::domain::job::{ALL_HEADERS_SAFE, ErrorType, Flag, JobStatus, Phase, timestamp_format};

/// Success marker written at the end of a completed job
pub const SUCCESS_MARKER: &str = "DATAPUSHER+ JOB DONE!";

/// Marker preceding the message of a failed job
pub const ERROR_MARKER: &str = "JobError:";

/// Marker where a Python traceback starts after an error message
pub const TRACEBACK_MARKER: &str = "Traceback";

pub const FETCH_MARKER: &str = "Fetching from:";

pub const TOTAL_TIME_LABEL: &str = "TOTAL ELAPSED TIME:";

/// Maximum number of characters kept from a free-text error message
pub const MAX_ERROR_MESSAGE_CHARS: usize = 100;

/// Ordered error signatures; the first one found in the block wins
pub const ERROR_SIGNATURES: &[(&str, ErrorType)] = &[
    ("File is not a zip file", ErrorType::CorruptedExcel),
    ("qsv command failed", ErrorType::QsvError),
    (
        "Only http, https, and ftp URLs are supported",
        ErrorType::InvalidUrl,
    ),
];

const VALID_CSV_MARKER: &str = "Well-formed, valid CSV file confirmed";
const INVALID_CSV_MARKER: &str = "Invalid CSV file";

/// Log label preceding the duration of a phase
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Download => "Download:",
        Phase::Analysis => "Analysis:",
        Phase::Copying => "COPYing:",
        Phase::Indexing => "Indexing:",
        Phase::Formulae => "Formulae processing:",
        Phase::Metadata => "Resource metadata updates:",
    }
}

fn job_id_re() -> &'static Regex {
    static JOB_ID_RE: OnceLock<Regex> = OnceLock::new();
    JOB_ID_RE.get_or_init(|| Regex::new(r"\[([0-9a-fA-F-]{36})\]").expect("valid job id regex"))
}

fn fetch_re() -> &'static Regex {
    static FETCH_RE: OnceLock<Regex> = OnceLock::new();
    FETCH_RE.get_or_init(|| {
        Regex::new(&format!(r"{}\s*(\S+)", regex::escape(FETCH_MARKER)))
            .expect("valid fetch regex")
    })
}

fn timestamp_re() -> &'static Regex {
    static TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_RE.get_or_init(|| {
        Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").expect("valid timestamp regex")
    })
}

fn decimal_after(label: &str) -> Regex {
    Regex::new(&format!(
        r"{}\s*(\d+(?:\.\d+)?|\.\d+)",
        regex::escape(label)
    ))
    .expect("valid timing regex")
}

fn total_time_re() -> &'static Regex {
    static TOTAL_TIME_RE: OnceLock<Regex> = OnceLock::new();
    TOTAL_TIME_RE.get_or_init(|| decimal_after(TOTAL_TIME_LABEL))
}

/// Timing regexes indexed in `Phase::ALL` order
fn phase_time_res() -> &'static [Regex] {
    static PHASE_TIME_RES: OnceLock<Vec<Regex>> = OnceLock::new();
    PHASE_TIME_RES.get_or_init(|| {
        Phase::ALL
            .iter()
            .map(|phase| decimal_after(phase_label(*phase)))
            .collect()
    })
}

fn records_re() -> &'static Regex {
    static RECORDS_RE: OnceLock<Regex> = OnceLock::new();
    RECORDS_RE.get_or_init(|| Regex::new(r"(\d+) records detected").expect("valid records regex"))
}

fn rows_copied_re() -> &'static Regex {
    static ROWS_RE: OnceLock<Regex> = OnceLock::new();
    ROWS_RE.get_or_init(|| Regex::new(r"(\d+) rows to").expect("valid rows regex"))
}

fn columns_indexed_re() -> &'static Regex {
    static COLUMNS_RE: OnceLock<Regex> = OnceLock::new();
    COLUMNS_RE.get_or_init(|| Regex::new(r"(\d+) column/s").expect("valid columns regex"))
}

fn encoding_re() -> &'static Regex {
    static ENCODING_RE: OnceLock<Regex> = OnceLock::new();
    ENCODING_RE.get_or_init(|| {
        Regex::new(r"Identified encoding of the file:\s*([A-Za-z0-9_-]+)")
            .expect("valid encoding regex")
    })
}

fn sorted_re() -> &'static Regex {
    static SORTED_RE: OnceLock<Regex> = OnceLock::new();
    SORTED_RE.get_or_init(|| {
        Regex::new(r"(?i)\bSorted:\s*(true|false)").expect("valid sorted regex")
    })
}

fn unsafe_headers_re() -> &'static Regex {
    static UNSAFE_RE: OnceLock<Regex> = OnceLock::new();
    UNSAFE_RE.get_or_init(|| Regex::new(r"(\d+) unsafe header").expect("valid header regex"))
}

fn normalization_re() -> &'static Regex {
    static NORMALIZATION_RE: OnceLock<Regex> = OnceLock::new();
    NORMALIZATION_RE
        .get_or_init(|| Regex::new(r"Normalization:\s*(\w+)").expect("valid normalization regex"))
}

fn analysis_status_re() -> &'static Regex {
    static ANALYSIS_RE: OnceLock<Regex> = OnceLock::new();
    ANALYSIS_RE
        .get_or_init(|| Regex::new(r"Analysis status:\s*(\w+)").expect("valid analysis regex"))
}

fn first_capture<'a>(re: &Regex, block: &'a str) -> Option<&'a str> {
    re.captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn non_negative(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

// =============================================================================
// Identity
// =============================================================================

/// First bracketed 36-character id in the block
pub fn extract_job_id(block: &str) -> Option<String> {
    first_capture(job_id_re(), block).map(str::to_string)
}

/// Raw source reference following the fetch marker
pub fn extract_source_reference(block: &str) -> Option<String> {
    first_capture(fetch_re(), block).map(str::to_string)
}

/// Final path segment of the source reference
pub fn extract_file_name(block: &str) -> Option<String> {
    extract_source_reference(block).and_then(|reference| file_name_from_reference(&reference))
}

/// Reduce a URL or path to its last segment
///
/// Trailing ellipses and punctuation, query strings and fragments are dropped.
pub fn file_name_from_reference(reference: &str) -> Option<String> {
    let trimmed = reference.trim_end_matches(['.', ',', ';', ':', ')', '"', '\'']);
    let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();
    without_query
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Upper-cased extension of a file name
pub fn file_format(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_uppercase())
}

/// First parseable `YYYY-MM-DD HH:MM:SS` timestamp in the block
pub fn extract_timestamp(block: &str) -> Option<NaiveDateTime> {
    timestamp_re()
        .find_iter(block)
        .find_map(|m| timestamp_format::parse(m.as_str()))
}

// =============================================================================
// Status and errors
// =============================================================================

/// Classify the block outcome; the success marker is checked first
pub fn extract_status(block: &str) -> JobStatus {
    if block.contains(SUCCESS_MARKER) {
        JobStatus::Success
    } else if block.contains(ERROR_MARKER) {
        JobStatus::Error
    } else {
        JobStatus::Incomplete
    }
}

/// Match the block against the ordered error signatures
pub fn classify_error(block: &str) -> ErrorType {
    ERROR_SIGNATURES
        .iter()
        .find(|(signature, _)| block.contains(signature))
        .map(|(_, error_type)| *error_type)
        .unwrap_or(ErrorType::UnknownError)
}

/// Text between the error marker and the traceback (or end of block)
///
/// Trimmed and capped at `MAX_ERROR_MESSAGE_CHARS` characters.
pub fn extract_error_message(block: &str) -> Option<String> {
    let start = block.find(ERROR_MARKER)? + ERROR_MARKER.len();
    let rest = &block[start..];
    let end = rest.find(TRACEBACK_MARKER).unwrap_or(rest.len());
    let message: String = rest[..end]
        .trim()
        .chars()
        .take(MAX_ERROR_MESSAGE_CHARS)
        .collect();
    let message = message.trim_end().to_string();
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

// =============================================================================
// Timings and counts
// =============================================================================

pub fn extract_total_time(block: &str) -> Option<f64> {
    first_capture(total_time_re(), block).and_then(non_negative)
}

pub fn extract_phase_time(block: &str, phase: Phase) -> Option<f64> {
    let index = Phase::ALL.iter().position(|p| *p == phase)?;
    first_capture(&phase_time_res()[index], block).and_then(non_negative)
}

pub fn extract_records(block: &str) -> Option<u64> {
    first_capture(records_re(), block).and_then(|digits| digits.parse().ok())
}

pub fn extract_rows_copied(block: &str) -> Option<u64> {
    first_capture(rows_copied_re(), block).and_then(|digits| digits.parse().ok())
}

pub fn extract_columns_indexed(block: &str) -> Option<u64> {
    first_capture(columns_indexed_re(), block).and_then(|digits| digits.parse().ok())
}

// =============================================================================
// Quality attributes
// =============================================================================

pub fn extract_encoding(block: &str) -> Option<String> {
    first_capture(encoding_re(), block).map(str::to_string)
}

pub fn extract_valid_csv(block: &str) -> Option<Flag> {
    if block.contains(VALID_CSV_MARKER) {
        Some(Flag::True)
    } else if block.contains(INVALID_CSV_MARKER) {
        Some(Flag::False)
    } else {
        None
    }
}

pub fn extract_sorted(block: &str) -> Option<Flag> {
    first_capture(sorted_re(), block).map(Flag::parse_lenient)
}

/// Header safety summary: either the all-safe marker or "N unsafe headers"
pub fn extract_db_safe_headers(block: &str) -> Option<String> {
    if block.contains(ALL_HEADERS_SAFE) {
        return Some(ALL_HEADERS_SAFE.to_string());
    }
    first_capture(unsafe_headers_re(), block).map(|count| format!("{} unsafe headers", count))
}

pub fn extract_normalized(block: &str) -> Option<String> {
    first_capture(normalization_re(), block).map(str::to_string)
}

pub fn extract_analysis(block: &str) -> Option<String> {
    first_capture(analysis_status_re(), block).map(str::to_string)
}

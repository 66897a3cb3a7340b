//! Job record assembly
//!
//! Composes the extraction rules into a `JobRecord` per block and applies
//! the defaults and the retention rule.

use crate::domain::job::{ErrorType, JobRecord, JobStatus, Phase, UNKNOWN, UNKNOWN_FORMAT};
use crate::parser::extract;
use crate::parser::segment::segment_blocks;

/// Build a record from a single job block
///
/// Returns `None` when neither a job id nor a file reference could be found.
pub fn build_record(block: &str) -> Option<JobRecord> {
    let job_id = extract::extract_job_id(block);
    let file_name = extract::extract_file_name(block);

    if job_id.is_none() && file_name.is_none() {
        return None;
    }

    let status = extract::extract_status(block);
    let file_format = file_name
        .as_deref()
        .and_then(extract::file_format)
        .unwrap_or_else(|| UNKNOWN_FORMAT.to_string());

    let (error_type, error_message) = match status {
        JobStatus::Error => classify(block),
        _ => (ErrorType::None, String::new()),
    };

    let phase = |p: Phase| extract::extract_phase_time(block, p).unwrap_or(0.0);

    Some(JobRecord {
        job_id: job_id.unwrap_or_else(|| UNKNOWN.to_string()),
        file_name: file_name.unwrap_or_else(|| UNKNOWN.to_string()),
        file_format,
        status,
        timestamp: extract::extract_timestamp(block),
        total_time: extract::extract_total_time(block).unwrap_or(0.0),
        download_time: phase(Phase::Download),
        analysis_time: phase(Phase::Analysis),
        copying_time: phase(Phase::Copying),
        indexing_time: phase(Phase::Indexing),
        formulae_time: phase(Phase::Formulae),
        metadata_time: phase(Phase::Metadata),
        records: extract::extract_records(block).unwrap_or(0),
        rows_copied: extract::extract_rows_copied(block).unwrap_or(0),
        columns_indexed: extract::extract_columns_indexed(block).unwrap_or(0),
        error_type,
        error_message,
        encoding: extract::extract_encoding(block).unwrap_or_default(),
        valid_csv: extract::extract_valid_csv(block).unwrap_or_default(),
        sorted: extract::extract_sorted(block).unwrap_or_default(),
        db_safe_headers: extract::extract_db_safe_headers(block).unwrap_or_default(),
        normalized: extract::extract_normalized(block).unwrap_or_default(),
        analysis: extract::extract_analysis(block).unwrap_or_default(),
    })
}

/// Error type and message for a failed block
///
/// Only unrecognized failures carry a free-text message.
fn classify(block: &str) -> (ErrorType, String) {
    match extract::classify_error(block) {
        ErrorType::UnknownError => {
            let message = extract::extract_error_message(block)
                .map(|m| escape_quotes(&m))
                .unwrap_or_default();
            (ErrorType::UnknownError, message)
        }
        known => (known, String::new()),
    }
}

/// Replace double quotes so the message sits cleanly in a table cell
pub fn escape_quotes(message: &str) -> String {
    message.replace('"', "'")
}

/// Parse a whole worker log into job records, in log order
pub fn parse_worker_log(text: &str) -> Vec<JobRecord> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (index, block) in segment_blocks(text).enumerate() {
        match build_record(block) {
            Some(record) => records.push(record),
            None => {
                dropped += 1;
                tracing::debug!("Skipping block {}: no job id or file reference", index);
            }
        }
    }

    tracing::info!(
        "Parsed {} job record(s), skipped {} unidentified block(s)",
        records.len(),
        dropped
    );

    records
}

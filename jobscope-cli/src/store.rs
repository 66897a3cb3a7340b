//! File access
//!
//! Reads worker logs, reads and writes the CSV job table, and writes JSON
//! metric documents.

use anyhow::{Context, Result, bail};
use jobscope_core::JobRecord;
use jobscope_core::dto::row::{COLUMNS, JobRow};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Read a whole worker log
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_log(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("Log file not found: {}", path.display());
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read log file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load a previously written job table
pub fn read_jobs(path: &Path) -> Result<Vec<JobRecord>> {
    if !path.exists() {
        bail!("Worker analysis file not found: {}", path.display());
    }
    let file =
        File::open(path).with_context(|| format!("Failed to open table {}", path.display()))?;
    let jobs = read_jobs_from(file)
        .with_context(|| format!("Failed to load job table {}", path.display()))?;

    tracing::info!("Loaded {} job(s) from {}", jobs.len(), path.display());

    Ok(jobs)
}

/// Parse a job table from any reader
///
/// The first row must be a header naming at least `job_id` and `status`.
pub fn read_jobs_from<R: Read>(reader: R) -> Result<Vec<JobRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read header row")?;
    for required in ["job_id", "status"] {
        if !headers.iter().any(|h| h.trim() == required) {
            bail!("Job table is missing the '{}' column in its header row", required);
        }
    }

    let mut jobs = Vec::new();
    for (line, row) in rdr.deserialize::<JobRow>().enumerate() {
        let row = row.with_context(|| format!("Malformed row {}", line + 1))?;
        jobs.push(JobRecord::from(row));
    }
    Ok(jobs)
}

/// Write the job table, creating parent directories as needed
pub fn write_jobs(path: &Path, jobs: &[JobRecord]) -> Result<()> {
    ensure_parent(path)?;
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_jobs_to(BufWriter::new(file), jobs)
        .with_context(|| format!("Failed to write job table {}", path.display()))?;

    tracing::info!("Wrote {} job(s) to {}", jobs.len(), path.display());

    Ok(())
}

/// Serialize the job table to any writer; the header is written even for no jobs
pub fn write_jobs_to<W: Write>(writer: W, jobs: &[JobRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for job in jobs {
        wtr.serialize(JobRow::from(job))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a pretty-printed JSON document
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::debug!("Wrote {}", path.display());

    Ok(())
}

/// Directory that sibling documents of `path` are written to
pub fn sibling_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    let dir = sibling_dir(path);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))
}

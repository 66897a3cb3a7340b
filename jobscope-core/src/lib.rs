//! Jobscope Core
//!
//! Parsing and analytics for DataPusher+ worker logs.
//!
//! This crate contains:
//! - Domain types: job records and the metric/report structures derived from them
//! - Parser: worker log text to `JobRecord`s
//! - Metrics: quality, anomalies, failure patterns, efficiency, predictions,
//!   business and compliance figures
//! - Report: executive summary and per-job scoring
//! - DTOs: flat rows for the CSV table

pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod metrics;
pub mod parser;
pub mod report;

pub use config::Thresholds;
pub use domain::job::{ErrorType, Flag, JobRecord, JobStatus};
pub use parser::parse_worker_log;

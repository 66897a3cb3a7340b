//! Worker log parser
//!
//! Turns raw worker log text into `JobRecord`s:
//! - `segment`: splits the log into per-job blocks
//! - `extract`: independent per-field pattern rules
//! - `builder`: assembles records, applies defaults and the retention rule

pub mod builder;
pub mod extract;
pub mod segment;

pub use builder::{build_record, parse_worker_log};
pub use segment::segment_blocks;

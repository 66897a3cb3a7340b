//! Core domain types
//!
//! Parsed job records plus the structures the metrics engine and report
//! assembler derive from them.

pub mod job;
pub mod metrics;
pub mod report;

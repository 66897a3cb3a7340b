//! Data Transfer Objects
//!
//! Flat representations of domain types for tabular storage.

pub mod row;

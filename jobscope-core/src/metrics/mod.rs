//! Metrics engine
//!
//! Pure functions over a slice of `JobRecord`s. Every function tolerates an
//! empty slice and returns a neutral result instead of failing.

pub mod anomaly;
pub mod business;
pub mod efficiency;
pub mod failure;
pub mod predictive;
pub mod quality;
pub mod security;
pub mod stats;

pub use anomaly::detect_performance_anomalies;
pub use business::generate_business_metrics;
pub use efficiency::{calculate_efficiency, job_efficiency};
pub use failure::analyze_failure_patterns;
pub use predictive::generate_predictive_insights;
pub use quality::{mean_quality_score, quality_score};
pub use security::generate_security_insights;

//! Terminal output formatting for awscost
//!
//! This crate renders the end-of-run summary, either as the human-readable
//! lines with an optional per-service table or as JSON.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, ReportView, TextFormatter, get_formatter};

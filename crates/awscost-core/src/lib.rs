//! Core types, date windows and response normalization for awscost
//!
//! This crate provides the error taxonomy, the domain types, date window
//! resolution, timezone configuration and the pure normalization step used
//! by the other awscost crates.

pub mod date_window;
pub mod error;
pub mod normalize;
pub mod response;
pub mod timezone;
pub mod types;

// Re-export commonly used types
pub use date_window::{DateSelection, DateWindow};
pub use error::{CostError, ErrorKind, Result};
pub use response::CostAndUsage;
pub use types::{CostRecord, CostSummary};

//! AWS access for awscost
//!
//! This crate wraps the two AWS services a run talks to: Cost Explorer for
//! the daily cost query and S3 for the report upload. Both sit behind
//! traits so the pipeline can run against in-memory fakes.

pub mod cost_explorer;
pub mod sdk;
pub mod uploader;

pub use cost_explorer::{CostExplorerSource, CostPage, CostSource};
pub use sdk::load_sdk_config;
pub use uploader::{ObjectStore, S3Store, Uploader, object_key};

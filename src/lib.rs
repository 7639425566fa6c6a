//! awscost - Daily AWS cost reports by service
//!
//! This library provides functionality to:
//! - Resolve the reporting window (one day, a range, or yesterday)
//! - Query Cost Explorer for unblended cost grouped by service
//! - Flatten the response into one record per day and service
//! - Save the records as JSON and CSV and upload them to S3
//! - Summarize the run on the terminal
//!
//! # Examples
//!
//! ```no_run
//! use awscost::{
//!     aws::{CostExplorerSource, S3Store, load_sdk_config},
//!     cli::Cli,
//!     config::Config,
//!     pipeline::Pipeline,
//! };
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> awscost::Result<()> {
//!     let config = Config::from_cli(&Cli::parse())?;
//!     let sdk_config = load_sdk_config(config.profile.as_deref()).await;
//!
//!     let source = CostExplorerSource::new(&sdk_config);
//!     let store = S3Store::new(&sdk_config);
//!     let report = Pipeline::new(&config, &source, &store)
//!         .run(config.timezone.today())
//!         .await?;
//!
//!     println!("{}", report.summary.formatted_total());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod persist;
pub mod pipeline;

// Re-export the workspace crates under one roof
pub use awscost_aws as aws;
pub use awscost_core::{date_window, error, normalize, response, timezone, types};
pub use awscost_terminal::output;

// Re-export commonly used types
pub use error::{CostError, ErrorKind, Result};
pub use types::{CostRecord, CostSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

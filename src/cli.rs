//! CLI interface for awscost
//!
//! Every setting can come from a flag or from the environment variable the
//! scheduled job sets, with flags winning.
//!
//! # Example
//!
//! ```bash
//! # Yesterday's costs, bucket from the environment
//! COST_S3_BUCKET=billing-reports awscost
//!
//! # One explicit day with a per-service table
//! awscost --bucket billing-reports --date 2024-01-15 --breakdown
//!
//! # All of January, JSON summary on stdout
//! awscost --bucket billing-reports --start 2024-01-01 --end 2024-01-31 --json
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Key prefix used when none is configured
pub const DEFAULT_PREFIX: &str = "aws-costs/";

/// Local directory report files are written to
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Fetch daily AWS costs by service, save them as JSON/CSV and upload them to S3
#[derive(Parser, Debug, Clone)]
#[command(name = "awscost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Named AWS profile to take credentials from
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// S3 bucket the reports are uploaded to (required)
    #[arg(long, env = "COST_S3_BUCKET")]
    pub bucket: Option<String>,

    /// Key prefix inside the bucket
    #[arg(long, env = "COST_S3_PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Report a single day (YYYY-MM-DD)
    #[arg(long, env = "COST_DATE")]
    pub date: Option<String>,

    /// First day of a range (YYYY-MM-DD, needs --end)
    #[arg(long, env = "COST_START")]
    pub start: Option<String>,

    /// Last day of a range, inclusive (YYYY-MM-DD, needs --start)
    #[arg(long, env = "COST_END")]
    pub end: Option<String>,

    /// Directory the JSON and CSV files are written to
    #[arg(long, env = "COST_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Skip the CSV file
    #[arg(long)]
    pub no_csv: bool,

    /// Print a per-service cost table
    #[arg(long, short = 'b')]
    pub breakdown: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Timezone that decides what "yesterday" is (e.g. "America/New_York", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z')]
    pub timezone: Option<String>,

    /// Use UTC to decide what "yesterday" is (overrides --timezone)
    #[arg(long)]
    pub utc: bool,

    /// Show informational logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

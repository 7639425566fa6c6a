//! Run configuration
//!
//! [`Config`] is built once in `main` from the parsed command line (which
//! already folded in the environment and `config/.env`) and handed to the
//! pipeline by reference.

use crate::cli::Cli;
use crate::persist::CsvOutput;
use awscost_core::date_window::DateSelection;
use awscost_core::error::{CostError, Result};
use awscost_core::timezone::TimezoneConfig;
use std::path::{Path, PathBuf};

/// Dotfile read before the command line is parsed
pub const DOTENV_PATH: &str = "config/.env";

/// Load `path` into the process environment if it exists
///
/// Variables that are already set keep their value. Returns the path when a
/// file was loaded.
pub fn load_dotenv(path: &Path) -> Result<Option<PathBuf>> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(CostError::Config(format!(
            "cannot load {}: {e}",
            path.display()
        ))),
    }
}

/// Settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    /// Named AWS profile, or the default credential chain
    pub profile: Option<String>,
    /// Destination bucket
    pub bucket: String,
    /// Key prefix inside the bucket
    pub prefix: String,
    /// Days to report on
    pub selection: DateSelection,
    /// Directory for the local report files
    pub output_dir: PathBuf,
    /// Whether a CSV file is written next to the JSON one
    pub csv: CsvOutput,
    /// Timezone that decides what "today" is
    pub timezone: TimezoneConfig,
}

impl Config {
    /// Validate the command line into a configuration
    ///
    /// # Errors
    ///
    /// Fails with [`CostError::Config`] when no bucket is set, and with the
    /// date or timezone error when one of those does not parse.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let bucket = cli
            .bucket
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                CostError::Config("COST_S3_BUCKET env var (or --bucket) is required".to_string())
            })?
            .to_string();

        let selection = DateSelection::from_inputs(
            cli.date.as_deref(),
            cli.start.as_deref(),
            cli.end.as_deref(),
        )?;
        let timezone = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;

        Ok(Self {
            profile: cli.profile.clone().filter(|p| !p.trim().is_empty()),
            bucket,
            prefix: cli.prefix.clone(),
            selection,
            output_dir: cli.output_dir.clone(),
            csv: CsvOutput::resolve(cli.no_csv),
            timezone,
        })
    }
}

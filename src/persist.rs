//! Local report files
//!
//! Records are always written as pretty-printed JSON. A CSV copy with the
//! same rows is written when the CSV capability is enabled. Both files are
//! created or overwritten in place; a crash mid-write can leave a truncated
//! file behind.

use awscost_core::error::Result;
use awscost_core::types::CostRecord;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Whether CSV output is produced
///
/// Resolved once at startup and passed to [`write_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvOutput {
    /// Write the CSV file
    Enabled,
    /// JSON only
    Disabled,
}

impl CsvOutput {
    /// Whether this build can write CSV at all
    pub const fn available() -> bool {
        cfg!(feature = "csv")
    }

    /// Enabled when the build supports CSV and the user did not opt out
    pub fn resolve(disabled_by_user: bool) -> Self {
        if Self::available() && !disabled_by_user {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Files written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFiles {
    /// The JSON report
    pub json: PathBuf,
    /// The CSV report, when CSV output is enabled
    pub csv: Option<PathBuf>,
}

impl PersistedFiles {
    /// All written paths, JSON first
    pub fn paths(&self) -> Vec<PathBuf> {
        std::iter::once(self.json.clone())
            .chain(self.csv.clone())
            .collect()
    }
}

/// File name for the report with `label` and extension `ext`
pub fn report_file_name(label: &str, ext: &str) -> String {
    format!("aws_costs_{label}.{ext}")
}

/// Write the report files for `label` into `dir`, creating it if needed
pub fn write_report(
    records: &[CostRecord],
    dir: &Path,
    label: &str,
    csv: CsvOutput,
) -> Result<PersistedFiles> {
    fs::create_dir_all(dir)?;

    let json_path = dir.join(report_file_name(label, "json"));
    write_json(records, &json_path)?;

    #[cfg(feature = "csv")]
    let csv_path = match csv {
        CsvOutput::Enabled => {
            let path = dir.join(report_file_name(label, "csv"));
            write_csv(records, &path)?;
            Some(path)
        }
        CsvOutput::Disabled => {
            debug!("CSV output disabled");
            None
        }
    };

    #[cfg(not(feature = "csv"))]
    let csv_path = {
        debug!("Built without CSV support, skipping CSV output ({:?})", csv);
        None
    };

    info!("Wrote {} records to {}", records.len(), json_path.display());
    Ok(PersistedFiles {
        json: json_path,
        csv: csv_path,
    })
}

/// Write `records` as 2-space indented JSON
pub fn write_json(records: &[CostRecord], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Read records back from a JSON report
pub fn read_json(path: &Path) -> Result<Vec<CostRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write `records` as CSV with a `date,service,amount,unit` header
///
/// The header is written even when there are no records.
#[cfg(feature = "csv")]
pub fn write_csv(records: &[CostRecord], path: &Path) -> Result<()> {
    use awscost_core::error::CostError;

    let csv_error = |e: csv::Error| CostError::Csv(format!("{}: {e}", path.display()));

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;

    writer
        .write_record(["date", "service", "amount", "unit"])
        .map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    writer.flush()?;

    debug!("Wrote {} CSV rows to {}", records.len(), path.display());
    Ok(())
}

//! The reporting run
//!
//! Resolves the date window, queries costs, normalizes them, writes the
//! local files and uploads them, strictly in that order. The first failing
//! step ends the run.

use crate::config::Config;
use crate::persist::{PersistedFiles, write_report};
use awscost_aws::{CostSource, ObjectStore, Uploader};
use awscost_core::date_window::DateWindow;
use awscost_core::error::Result;
use awscost_core::normalize::normalize;
use awscost_core::types::{CostRecord, CostSummary, ServiceCost, costs_by_service};
use awscost_terminal::output::ReportView;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The days reported on
    pub window: DateWindow,
    /// Normalized records, in response order
    pub records: Vec<CostRecord>,
    /// Local files written
    pub files: PersistedFiles,
    /// Object keys uploaded
    pub uploaded_keys: Vec<String>,
    /// Totals over `records`
    pub summary: CostSummary,
    /// Per-service totals, most expensive first
    pub services: Vec<ServiceCost>,
}

impl RunReport {
    /// View for the output formatters
    pub fn view<'a>(&'a self, config: &'a Config) -> ReportView<'a> {
        ReportView {
            label: &self.window.label,
            bucket: &config.bucket,
            prefix: &config.prefix,
            summary: &self.summary,
            services: &self.services,
            uploaded_keys: &self.uploaded_keys,
        }
    }
}

/// One reporting run over a cost source and an object store
pub struct Pipeline<'a, C: CostSource, S: ObjectStore> {
    config: &'a Config,
    source: &'a C,
    store: &'a S,
    show_progress: bool,
}

impl<'a, C: CostSource, S: ObjectStore> Pipeline<'a, C, S> {
    /// Create a pipeline
    pub fn new(config: &'a Config, source: &'a C, store: &'a S) -> Self {
        Self {
            config,
            source,
            store,
            show_progress: false,
        }
    }

    /// Show a spinner while the run is in progress
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn spinner(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Run every step for the window that `today` implies
    pub async fn run(&self, today: NaiveDate) -> Result<RunReport> {
        let window = DateWindow::resolve(&self.config.selection, today)?;
        info!(
            "Fetching costs from {} to {} (exclusive) for {}",
            window.start_str(),
            window.end_str(),
            window.label
        );

        let progress = self.spinner();
        let result = self.execute(&window, progress.as_ref()).await;
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        let (records, files, uploaded_keys) = result?;

        let summary = CostSummary::from_records(&records);
        let services = costs_by_service(&records);

        Ok(RunReport {
            window,
            records,
            files,
            uploaded_keys,
            summary,
            services,
        })
    }

    async fn execute(
        &self,
        window: &DateWindow,
        progress: Option<&ProgressBar>,
    ) -> Result<(Vec<CostRecord>, PersistedFiles, Vec<String>)> {
        let step = |msg: &'static str| {
            if let Some(pb) = progress {
                pb.set_message(msg);
            }
        };

        step("Querying Cost Explorer...");
        let response = self.source.cost_and_usage(window).await?;
        let records = normalize(&response)?;

        step("Writing report files...");
        let files = write_report(
            &records,
            &self.config.output_dir,
            &window.label,
            self.config.csv,
        )?;

        step("Uploading to S3...");
        let uploaded_keys = Uploader::new(self.store, &self.config.bucket, &self.config.prefix)
            .upload_all(&files.paths())
            .await?;

        Ok((records, files, uploaded_keys))
    }
}

//! Output formatting module for awscost
//!
//! This module provides formatters for the summary printed after a run:
//! - Text format: the upload line, the total line and, on request, a
//!   per-service table
//! - JSON format for scripts that want the same numbers
//!
//! # Examples
//!
//! ```
//! use awscost_core::types::{CostRecord, CostSummary, costs_by_service};
//! use awscost_terminal::output::{ReportView, get_formatter};
//!
//! let records = vec![
//!     CostRecord::new("2024-01-01", "AmazonEC2", 12.34, "USD"),
//!     CostRecord::new("2024-01-01", "AmazonS3", 0.5, "USD"),
//! ];
//! let summary = CostSummary::from_records(&records);
//! let services = costs_by_service(&records);
//! let keys = vec!["aws-costs/aws_costs_2024-01-01.json".to_string()];
//!
//! let view = ReportView {
//!     label: "2024-01-01",
//!     bucket: "billing",
//!     prefix: "aws-costs/",
//!     summary: &summary,
//!     services: &services,
//!     uploaded_keys: &keys,
//! };
//!
//! let text = get_formatter(false, false).format_report(&view, false);
//! assert!(text.contains("Total = 12.84 USD"));
//! ```

use awscost_core::types::{CostSummary, ServiceCost};
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::json;

/// Everything the formatters need about a finished run
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    /// Window label, e.g. `2024-01-01` or `2024-01-01_to_2024-01-31`
    pub label: &'a str,
    /// Destination bucket
    pub bucket: &'a str,
    /// Key prefix as configured
    pub prefix: &'a str,
    /// Totals over all records
    pub summary: &'a CostSummary,
    /// Per-service totals, most expensive first
    pub services: &'a [ServiceCost],
    /// Object keys written during the run
    pub uploaded_keys: &'a [String],
}

impl ReportView<'_> {
    /// `s3://bucket/prefix` as shown in the summary
    pub fn destination(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.prefix)
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render the end-of-run report, with the per-service table if
    /// `breakdown` is set
    fn format_report(&self, view: &ReportView<'_>, breakdown: bool) -> String;
}

/// Human-readable formatter
pub struct TextFormatter {
    colored_output: bool,
}

impl TextFormatter {
    /// Create a new TextFormatter
    pub fn new(colored_output: bool) -> Self {
        Self { colored_output }
    }

    fn format_amount(amount: f64) -> String {
        format!("{amount:.2}")
    }

    fn format_share(amount: f64, total: f64) -> String {
        if total > 0.0 {
            format!("{:.1}%", amount / total * 100.0)
        } else {
            "-".to_string()
        }
    }

    /// Per-service table with a totals row
    pub fn format_breakdown(&self, services: &[ServiceCost], summary: &CostSummary) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Service",
            b -> "Days",
            b -> format!("Cost ({})", summary.unit),
            b -> "Share"
        ]);

        for service in services {
            table.add_row(row![
                service.service,
                r -> service.days,
                r -> Self::format_amount(service.amount),
                r -> Self::format_share(service.amount, summary.total)
            ]);
        }

        table.add_row(row![
            b -> "TOTAL",
            "",
            br -> Self::format_amount(summary.total),
            ""
        ]);

        table.to_string()
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, view: &ReportView<'_>, breakdown: bool) -> String {
        let mut output = String::new();

        if breakdown {
            output.push_str(&self.format_breakdown(view.services, view.summary));
        }

        let upload_line = format!(
            "✅ Uploaded billing for {} → {}",
            view.label,
            view.destination()
        );
        let total_line = format!("💰 Total = {}", view.summary.formatted_total());

        if self.colored_output {
            output.push_str(&format!(
                "{}\n{}",
                upload_line.green(),
                total_line.bold()
            ));
        } else {
            output.push_str(&format!("{upload_line}\n{total_line}"));
        }

        output
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, view: &ReportView<'_>, breakdown: bool) -> String {
        let mut output = json!({
            "label": view.label,
            "destination": view.destination(),
            "uploaded": view.uploaded_keys,
            "total": view.summary.total,
            "unit": view.summary.unit,
            "records": view.summary.record_count,
        });

        if breakdown {
            output["services"] = view
                .services
                .iter()
                .map(|s| {
                    json!({
                        "service": s.service,
                        "days": s.days,
                        "amount": s.amount,
                    })
                })
                .collect();
        }

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Get the formatter for the requested output style
pub fn get_formatter(json: bool, colored_output: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TextFormatter::new(colored_output))
    }
}

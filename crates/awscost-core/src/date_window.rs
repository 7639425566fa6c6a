//! Date window resolution
//!
//! Turns the three mutually exclusive date settings (a single day, an
//! inclusive start/end range, or nothing at all) into the half-open interval
//! Cost Explorer expects, plus the label used in output file names.
//!
//! # Examples
//!
//! ```
//! use awscost_core::date_window::{DateSelection, DateWindow};
//! use chrono::NaiveDate;
//!
//! let selection = DateSelection::from_inputs(None, Some("2024-01-01"), Some("2024-01-31")).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let window = DateWindow::resolve(&selection, today).unwrap();
//!
//! assert_eq!(window.start_str(), "2024-01-01");
//! assert_eq!(window.end_str(), "2024-02-01");
//! assert_eq!(window.label, "2024-01-01_to_2024-01-31");
//! ```

use crate::error::{CostError, Result};
use chrono::{Days, NaiveDate};
use std::fmt;
use tracing::warn;

/// Date format used for every date awscost reads or writes
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT).map_err(|e| {
        CostError::InvalidDate(format!("'{date_str}' is not a YYYY-MM-DD date ({e})"))
    })
}

/// Which days a run reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    /// One explicit day
    Single(NaiveDate),
    /// Every day from `start` through `end`, both inclusive
    Range {
        /// First day
        start: NaiveDate,
        /// Last day
        end: NaiveDate,
    },
    /// The day before today
    Yesterday,
}

impl DateSelection {
    /// Build a selection from raw configuration values
    ///
    /// A single date wins over a range. A range needs both ends; a lone
    /// start or end is ignored and the run falls back to yesterday. A range
    /// whose start is after its end is rejected here, so every input error
    /// surfaces while the configuration is built.
    pub fn from_inputs(date: Option<&str>, start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let date = date.filter(|s| !s.trim().is_empty());
        let start = start.filter(|s| !s.trim().is_empty());
        let end = end.filter(|s| !s.trim().is_empty());

        if let Some(date) = date {
            if start.is_some() || end.is_some() {
                warn!("Single date {} given, ignoring start/end range", date);
            }
            return Ok(Self::Single(parse_date(date)?));
        }

        match (start, end) {
            (Some(start), Some(end)) => {
                let (start, end) = (parse_date(start)?, parse_date(end)?);
                if start > end {
                    return Err(CostError::InvalidDateRange { start, end });
                }
                Ok(Self::Range { start, end })
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!("Both start and end are needed for a range, reporting yesterday instead");
                Ok(Self::Yesterday)
            }
            (None, None) => Ok(Self::Yesterday),
        }
    }
}

impl fmt::Display for DateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSelection::Single(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            DateSelection::Range { start, end } => write!(
                f,
                "{} to {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
            DateSelection::Yesterday => write!(f, "yesterday"),
        }
    }
}

/// Half-open interval of days `[start, end)` with a display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Day after the last day, exclusive
    pub end: NaiveDate,
    /// Label used in file names and the summary line
    pub label: String,
}

impl DateWindow {
    /// Resolve `selection` against `today`
    ///
    /// `today` is injected so callers decide which clock and timezone count.
    /// Labels are always rendered as zero-padded `YYYY-MM-DD`, whatever
    /// padding the configured dates used.
    pub fn resolve(selection: &DateSelection, today: NaiveDate) -> Result<Self> {
        match *selection {
            DateSelection::Single(date) => Ok(Self {
                start: date,
                end: next_day(date)?,
                label: date.format(DATE_FORMAT).to_string(),
            }),
            DateSelection::Range { start, end } => {
                if start > end {
                    return Err(CostError::InvalidDateRange { start, end });
                }
                Ok(Self {
                    start,
                    end: next_day(end)?,
                    label: format!(
                        "{}_to_{}",
                        start.format(DATE_FORMAT),
                        end.format(DATE_FORMAT)
                    ),
                })
            }
            DateSelection::Yesterday => {
                let yesterday = today.checked_sub_days(Days::new(1)).ok_or_else(|| {
                    CostError::InvalidDate(format!("no day before {today}"))
                })?;
                Ok(Self {
                    start: yesterday,
                    end: today,
                    label: yesterday.format(DATE_FORMAT).to_string(),
                })
            }
        }
    }

    /// Inclusive start as `YYYY-MM-DD`
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Exclusive end as `YYYY-MM-DD`
    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| CostError::InvalidDate(format!("no day after {date}")))
}

//! Core domain types for awscost
//!
//! A run produces a flat list of [`CostRecord`]s, one per (day, service)
//! pair reported by Cost Explorer. [`CostSummary`] folds them into the total
//! printed at the end of a run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Currency reported when there are no records to take a unit from
pub const DEFAULT_UNIT: &str = "USD";

/// Cost of one AWS service on one day
///
/// Serializes with exactly the fields `date`, `service`, `amount` and
/// `unit`, which is the layout of both the JSON and the CSV artifacts.
///
/// # Examples
/// ```
/// use awscost_core::types::CostRecord;
///
/// let record = CostRecord::new("2024-01-01", "AmazonEC2", 12.34, "USD");
/// assert_eq!(record.service, "AmazonEC2");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Day the cost was incurred (YYYY-MM-DD)
    pub date: String,
    /// Service name as reported by Cost Explorer
    pub service: String,
    /// Unblended cost
    pub amount: f64,
    /// Currency code
    pub unit: String,
}

impl CostRecord {
    /// Create a new CostRecord
    pub fn new(
        date: impl Into<String>,
        service: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            service: service.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// Cost of one service summed over every day of the window
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCost {
    /// Service name
    pub service: String,
    /// Sum of the service's amounts
    pub amount: f64,
    /// Number of daily records folded in
    pub days: usize,
}

/// Totals over a set of records
///
/// # Examples
/// ```
/// use awscost_core::types::{CostRecord, CostSummary};
///
/// let records = vec![
///     CostRecord::new("2024-01-01", "AmazonEC2", 12.34, "USD"),
///     CostRecord::new("2024-01-01", "AmazonS3", 0.5, "USD"),
/// ];
/// let summary = CostSummary::from_records(&records);
/// assert_eq!(summary.formatted_total(), "12.84 USD");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    /// Sum of all amounts
    pub total: f64,
    /// Unit of the first record, or [`DEFAULT_UNIT`]
    pub unit: String,
    /// Number of records summed
    pub record_count: usize,
}

impl Default for CostSummary {
    fn default() -> Self {
        Self {
            total: 0.0,
            unit: DEFAULT_UNIT.to_string(),
            record_count: 0,
        }
    }
}

impl CostSummary {
    /// Sum the amounts of `records`
    pub fn from_records(records: &[CostRecord]) -> Self {
        let Some(first) = records.first() else {
            return Self::default();
        };

        Self {
            total: records.iter().map(|r| r.amount).sum(),
            unit: first.unit.clone(),
            record_count: records.len(),
        }
    }

    /// Total with two decimals followed by the unit
    pub fn formatted_total(&self) -> String {
        format!("{:.2} {}", self.total, self.unit)
    }
}

/// Fold records into one entry per service, most expensive first
///
/// Ties are broken by service name so the output is stable.
pub fn costs_by_service(records: &[CostRecord]) -> Vec<ServiceCost> {
    let mut by_service: HashMap<&str, ServiceCost> = HashMap::new();

    for record in records {
        let entry = by_service
            .entry(record.service.as_str())
            .or_insert_with(|| ServiceCost {
                service: record.service.clone(),
                amount: 0.0,
                days: 0,
            });
        entry.amount += record.amount;
        entry.days += 1;
    }

    let mut services: Vec<ServiceCost> = by_service.into_values().collect();
    services.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.service.cmp(&b.service))
    });
    services
}

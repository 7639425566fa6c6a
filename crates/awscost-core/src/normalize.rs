//! Flattening of Cost Explorer responses into [`CostRecord`]s
//!
//! Records come out in response order: periods as returned, and groups in
//! the order Cost Explorer listed them within each period. Nothing is
//! sorted here.

use crate::error::{CostError, Result};
use crate::response::{CostAndUsage, Group, UNBLENDED_COST};
use crate::types::CostRecord;
use tracing::debug;

/// Flatten `response` into one record per (period, service group)
///
/// Amounts arrive as exact decimal strings and are converted to `f64`, which
/// is precise enough for reporting but not for accounting.
///
/// # Errors
///
/// Returns [`CostError::MalformedResponse`] for a group without keys or
/// without an unblended cost, and [`CostError::InvalidAmount`] for an amount
/// that is not a number.
///
/// # Examples
///
/// ```
/// use awscost_core::normalize::normalize;
/// use awscost_core::response::{CostAndUsage, Group, ResultByTime, TimePeriod};
///
/// let response = CostAndUsage {
///     results_by_time: vec![ResultByTime {
///         time_period: TimePeriod { start: "2024-01-01".into(), end: "2024-01-02".into() },
///         groups: vec![Group::unblended("AmazonEC2", "12.3400", "USD")],
///     }],
/// };
///
/// let records = normalize(&response).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].amount, 12.34);
/// ```
pub fn normalize(response: &CostAndUsage) -> Result<Vec<CostRecord>> {
    let mut records = Vec::with_capacity(response.group_count());

    for period in &response.results_by_time {
        let date = &period.time_period.start;
        for group in &period.groups {
            records.push(normalize_group(date, group)?);
        }
    }

    debug!(
        "Normalized {} periods into {} records",
        response.results_by_time.len(),
        records.len()
    );
    Ok(records)
}

fn normalize_group(date: &str, group: &Group) -> Result<CostRecord> {
    let service = group.keys.first().ok_or_else(|| {
        CostError::MalformedResponse(format!("group without a service key on {date}"))
    })?;

    let metric = group.metrics.get(UNBLENDED_COST).ok_or_else(|| {
        CostError::MalformedResponse(format!(
            "no {UNBLENDED_COST} metric for {service} on {date}"
        ))
    })?;

    let amount = metric
        .amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| CostError::InvalidAmount {
            service: service.clone(),
            amount: metric.amount.clone(),
        })?;

    Ok(CostRecord::new(date, service.as_str(), amount, metric.unit.as_str()))
}

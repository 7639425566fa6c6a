//! Cost Explorer response model
//!
//! A plain mirror of the parts of `GetCostAndUsage` that awscost reads. The
//! AWS client converts SDK output into these types, and they deserialize
//! from the PascalCase JSON printed by `aws ce get-cost-and-usage`, which
//! keeps the normalizer free of any SDK dependency.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metric requested from Cost Explorer
pub const UNBLENDED_COST: &str = "UnblendedCost";

/// Dimension the results are grouped by
pub const SERVICE_DIMENSION: &str = "SERVICE";

/// All result periods of a query, across every page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAndUsage {
    /// One entry per day of the window
    #[serde(default)]
    pub results_by_time: Vec<ResultByTime>,
}

impl CostAndUsage {
    /// Append the periods of a following page
    pub fn extend(&mut self, page: CostAndUsage) {
        self.results_by_time.extend(page.results_by_time);
    }

    /// Total number of groups over all periods
    pub fn group_count(&self) -> usize {
        self.results_by_time.iter().map(|p| p.groups.len()).sum()
    }
}

/// Results for one time period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultByTime {
    /// The period the groups belong to
    pub time_period: TimePeriod,
    /// One group per service
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Half-open period reported by Cost Explorer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimePeriod {
    /// Inclusive start (YYYY-MM-DD)
    pub start: String,
    /// Exclusive end (YYYY-MM-DD)
    pub end: String,
}

/// Costs of one group within a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    /// Group-by values; the first is the service name
    #[serde(default)]
    pub keys: Vec<String>,
    /// Metric name to value
    #[serde(default)]
    pub metrics: HashMap<String, MetricValue>,
}

impl Group {
    /// Group for `service` carrying an unblended cost
    pub fn unblended(
        service: impl Into<String>,
        amount: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        let mut metrics = HashMap::new();
        metrics.insert(
            UNBLENDED_COST.to_string(),
            MetricValue {
                amount: amount.into(),
                unit: unit.into(),
            },
        );
        Self {
            keys: vec![service.into()],
            metrics,
        }
    }
}

/// A metric amount as an exact decimal string plus its unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    /// Decimal amount, e.g. "12.3400000000"
    pub amount: String,
    /// Currency code
    pub unit: String,
}

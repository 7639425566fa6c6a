//! Cost Explorer client
//!
//! Issues `GetCostAndUsage` with daily granularity, the unblended cost
//! metric and grouping by the SERVICE dimension, following page tokens
//! until Cost Explorer has nothing more to return.

use crate::sdk::COST_EXPLORER_REGION;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_costexplorer::Client;
use aws_sdk_costexplorer::config::Region;
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::operation::get_cost_and_usage::GetCostAndUsageOutput;
use aws_sdk_costexplorer::types as ce;
use awscost_core::date_window::DateWindow;
use awscost_core::error::{CostError, Result};
use awscost_core::response::{
    CostAndUsage, Group, MetricValue, ResultByTime, SERVICE_DIMENSION, TimePeriod, UNBLENDED_COST,
};
use std::collections::HashSet;
use tracing::{debug, info};

/// One page of a cost query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostPage {
    /// Periods returned on this page
    pub response: CostAndUsage,
    /// Token for the following page, if any
    pub next_page_token: Option<String>,
}

/// Source of daily per-service costs
///
/// Implementors fetch single pages; [`CostSource::cost_and_usage`] stitches
/// them together.
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Fetch one page of results for `window`
    async fn fetch_page(&self, window: &DateWindow, page_token: Option<&str>) -> Result<CostPage>;

    /// Fetch every page for `window` and concatenate them in order
    ///
    /// Fails with [`CostError::MalformedResponse`] if a page token comes back
    /// that was already followed.
    async fn cost_and_usage(&self, window: &DateWindow) -> Result<CostAndUsage> {
        let mut all = CostAndUsage::default();
        let mut token: Option<String> = None;
        let mut seen_tokens = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(window, token.as_deref()).await?;
            pages += 1;
            all.extend(page.response);

            let Some(next) = page.next_page_token else {
                break;
            };
            // A token handed out twice means the pages cycle
            if !seen_tokens.insert(next.clone()) {
                return Err(CostError::MalformedResponse(format!(
                    "page token {next} repeated after {pages} page(s)"
                )));
            }
            debug!("Fetching page {} of cost results", pages + 1);
            token = Some(next);
        }

        info!(
            "Fetched {} periods ({} groups) in {} page(s)",
            all.results_by_time.len(),
            all.group_count(),
            pages
        );
        Ok(all)
    }
}

/// [`CostSource`] backed by the Cost Explorer API
pub struct CostExplorerSource {
    client: Client,
}

impl CostExplorerSource {
    /// Create a client pinned to the Cost Explorer region
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_conf(client_config(sdk_config).build())
    }

    /// Create a source from a fully built client configuration
    pub fn from_conf(config: aws_sdk_costexplorer::Config) -> Self {
        Self {
            client: Client::from_conf(config),
        }
    }
}

/// Client configuration for `sdk_config`, with the region forced to
/// [`COST_EXPLORER_REGION`]
pub fn client_config(sdk_config: &SdkConfig) -> aws_sdk_costexplorer::config::Builder {
    aws_sdk_costexplorer::config::Builder::from(sdk_config)
        .region(Region::new(COST_EXPLORER_REGION))
}

#[async_trait]
impl CostSource for CostExplorerSource {
    async fn fetch_page(&self, window: &DateWindow, page_token: Option<&str>) -> Result<CostPage> {
        let time_period = ce::DateInterval::builder()
            .start(window.start_str())
            .end(window.end_str())
            .build()
            .map_err(|e| CostError::CostQuery(e.to_string()))?;

        let group_by = ce::GroupDefinition::builder()
            .r#type(ce::GroupDefinitionType::Dimension)
            .key(SERVICE_DIMENSION)
            .build();

        debug!(
            "GetCostAndUsage {} to {} (token: {:?})",
            window.start_str(),
            window.end_str(),
            page_token
        );

        let output = self
            .client
            .get_cost_and_usage()
            .time_period(time_period)
            .granularity(ce::Granularity::Daily)
            .metrics(UNBLENDED_COST)
            .group_by(group_by)
            .set_next_page_token(page_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| CostError::CostQuery(DisplayErrorContext(&e).to_string()))?;

        convert_output(&output)
    }
}

/// Convert SDK output into the SDK-neutral response model
pub fn convert_output(output: &GetCostAndUsageOutput) -> Result<CostPage> {
    let results_by_time = output
        .results_by_time()
        .iter()
        .map(convert_result)
        .collect::<Result<Vec<_>>>()?;

    Ok(CostPage {
        response: CostAndUsage { results_by_time },
        next_page_token: output
            .next_page_token()
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    })
}

fn convert_result(result: &ce::ResultByTime) -> Result<ResultByTime> {
    let period = result.time_period().ok_or_else(|| {
        CostError::MalformedResponse("result without a time period".to_string())
    })?;

    Ok(ResultByTime {
        time_period: TimePeriod {
            start: period.start().to_string(),
            end: period.end().to_string(),
        },
        groups: result.groups().iter().map(convert_group).collect(),
    })
}

fn convert_group(group: &ce::Group) -> Group {
    let metrics = group
        .metrics()
        .map(|metrics| {
            metrics
                .iter()
                .filter_map(|(name, value)| {
                    Some((
                        name.clone(),
                        MetricValue {
                            amount: value.amount()?.to_string(),
                            unit: value.unit().unwrap_or_default().to_string(),
                        },
                    ))
                })
                .collect()
        })
        .unwrap_or_default();

    Group {
        keys: group.keys().to_vec(),
        metrics,
    }
}

//! Shared AWS SDK configuration

use aws_config::{BehaviorVersion, SdkConfig};
use tracing::debug;

/// Region Cost Explorer is served from
pub const COST_EXPLORER_REGION: &str = "us-east-1";

/// Region used for S3 when neither the environment nor the profile sets one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Load SDK configuration from the default provider chain
///
/// Credentials and the default region come from the usual environment
/// variables, shared config files and instance metadata. When `profile` is
/// set, only that named profile is consulted.
pub async fn load_sdk_config(profile: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = profile {
        debug!("Using AWS profile {}", profile);
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

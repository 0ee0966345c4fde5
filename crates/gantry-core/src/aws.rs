//! AWS SDK configuration loading.

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Loads the shared AWS configuration.
///
/// Uses the SDK's default provider chain (environment, profile, instance
/// metadata); `region` overrides the chain's region when given. The
/// returned config backs both the SQS and S3 clients so credentials are
/// resolved once.
pub async fn load_config(region: Option<String>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }
    loader.load().await
}

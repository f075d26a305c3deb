//! AWS-backed implementations of the report ports.
//!
//! Each service gets its own SDK configuration so the three can live in
//! different regions. Credentials come from the default provider chain.

pub mod backup;
pub mod ec2;
pub mod ses;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

use crate::config::ServiceRegions;

pub use backup::AwsBackupJobSource;
pub use ec2::AwsInstanceDirectory;
pub use ses::SesNotificationSink;

/// The three service adapters, built from one set of regions.
#[derive(Debug, Clone)]
pub struct AwsAdapters {
    pub source: AwsBackupJobSource,
    pub directory: AwsInstanceDirectory,
    pub sink: SesNotificationSink,
}

impl AwsAdapters {
    pub async fn load(regions: &ServiceRegions) -> Self {
        let backup = sdk_config(regions.backup.as_deref()).await;
        let ec2 = sdk_config(regions.ec2.as_deref()).await;
        let ses = sdk_config(regions.ses.as_deref()).await;

        Self {
            source: AwsBackupJobSource::new(aws_sdk_backup::Client::new(&backup)),
            directory: AwsInstanceDirectory::new(aws_sdk_ec2::Client::new(&ec2)),
            sink: SesNotificationSink::new(aws_sdk_ses::Client::new(&ses)),
        }
    }
}

async fn sdk_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    let config = loader.load().await;
    debug!(region = ?config.region(), "loaded aws sdk config");
    config
}

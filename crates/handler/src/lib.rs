//! Invocation entry point of the daily backup report.

pub mod context;

use chrono::{NaiveDate, Utc};
use serde_json::Value as JsonValue;
use tracing::{Instrument, info, info_span};

use backup_report_core::{
    BackupJobSource, InstanceDirectory, InvocationResult, NotificationSink, ReportGenerator,
};
use backup_report_infra::ReportConfig;
use backup_report_infra::aws::{
    AwsAdapters, AwsBackupJobSource, AwsInstanceDirectory, SesNotificationSink,
};

pub use context::InvocationContext;

/// Handler wired to the real AWS services.
pub type AwsReportHandler =
    ReportHandler<AwsBackupJobSource, AwsInstanceDirectory, SesNotificationSink>;

/// Holds the generator across invocations; each call is an independent run.
pub struct ReportHandler<S, D, N> {
    generator: ReportGenerator<S, D, N>,
}

impl<S, D, N> ReportHandler<S, D, N>
where
    S: BackupJobSource,
    D: InstanceDirectory,
    N: NotificationSink,
{
    pub fn new(generator: ReportGenerator<S, D, N>) -> Self {
        Self { generator }
    }

    /// Run one report.
    ///
    /// `event` and `context` are accepted for the host's calling convention
    /// and do not influence the report.
    pub async fn handle(&self, event: JsonValue, context: InvocationContext) -> InvocationResult {
        self.handle_on(event, context, Utc::now().date_naive()).await
    }

    /// Run one report treating `today` as the current UTC date.
    pub async fn handle_on(
        &self,
        event: JsonValue,
        context: InvocationContext,
        today: NaiveDate,
    ) -> InvocationResult {
        let span = info_span!("backup_report", request_id = %context.request_id());
        async move {
            info!(event = %event, "report invoked");
            let result = self.generator.invoke_for(today).await;
            info!(status_code = result.status_code, "report finished");
            result
        }
        .instrument(span)
        .await
    }
}

impl AwsReportHandler {
    /// Build AWS clients for the configured regions.
    pub async fn from_config(config: &ReportConfig) -> Self {
        let aws = AwsAdapters::load(&config.regions).await;
        Self::new(ReportGenerator::new(
            aws.source,
            aws.directory,
            aws.sink,
            config.settings(),
        ))
    }
}

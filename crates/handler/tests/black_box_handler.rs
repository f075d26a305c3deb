use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, TimeZone, Utc};
use serde_json::json;

use backup_report_core::{
    BackupJobRecord, BackupJobState, DeliveryError, EmptyReportPolicy, InstanceDescriptor,
    ReportGenerator, ReportSettings,
};
use backup_report_handler::{InvocationContext, ReportHandler};
use backup_report_infra::{
    InMemoryBackupJobSource, InMemoryInstanceDirectory, RecordingNotificationSink,
};

type TestHandler = ReportHandler<
    Arc<InMemoryBackupJobSource>,
    Arc<InMemoryInstanceDirectory>,
    Arc<RecordingNotificationSink>,
>;

struct Fixture {
    directory: Arc<InMemoryInstanceDirectory>,
    sink: Arc<RecordingNotificationSink>,
    handler: TestHandler,
}

impl Fixture {
    fn new(jobs: Vec<BackupJobRecord>) -> Self {
        let source = Arc::new(InMemoryBackupJobSource::new(jobs));
        let directory = Arc::new(InMemoryInstanceDirectory::new());
        let sink = Arc::new(RecordingNotificationSink::new());
        let settings = ReportSettings::new("reports@example.com", "ops@example.com")
            .with_empty_policy(EmptyReportPolicy::SkipWhenNoJobs);
        let handler = ReportHandler::new(ReportGenerator::new(
            source,
            directory.clone(),
            sink.clone(),
            settings,
        ));
        Self {
            directory,
            sink,
            handler,
        }
    }
}

fn report_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap()
}

fn ec2_job(instance: &str, state: BackupJobState) -> BackupJobRecord {
    BackupJobRecord::new(
        format!("arn:aws:ec2:us-east-1:123456789012:instance/{instance}"),
        state,
        "EC2",
        morning(),
    )
}

#[tokio::test]
async fn daily_report_is_sent_and_returns_200() {
    let mut stale = ec2_job("i-old", BackupJobState::Completed);
    stale.created_at = morning() - ChronoDuration::days(3);

    let fx = Fixture::new(vec![
        ec2_job("i-web", BackupJobState::Completed),
        stale,
        ec2_job("i-batch", BackupJobState::Failed).with_status_message("Access denied"),
    ]);
    fx.directory
        .insert(InstanceDescriptor::new("i-web").with_tag("Name", "web-01"));
    fx.directory.insert(InstanceDescriptor::new("i-batch"));
    fx.directory.insert(InstanceDescriptor::new("i-old"));

    let result = fx
        .handler
        .handle_on(
            json!({"source": "aws.events"}),
            InvocationContext::new(),
            report_day(),
        )
        .await;

    assert_eq!(result.status_code, 200);
    let body = serde_json::to_value(&result).unwrap();
    assert_eq!(
        body["body"],
        "\"Backup job status fetched and email sent successfully\""
    );

    let sent = fx.sink.sent();
    assert_eq!(sent.len(), 1);
    let html = &sent[0].html_body;
    assert!(html.contains("<tr><td>web-01</td><td>COMPLETED</td><td>i-web</td><td>EC2</td><td>N/A</td></tr>"));
    assert!(html.contains("<tr><td>Unnamed</td><td>FAILED</td><td>i-batch</td><td>EC2</td><td>Access denied</td></tr>"));
    assert!(!html.contains("i-old"));
}

#[tokio::test]
async fn empty_listing_returns_200_without_email() {
    let fx = Fixture::new(vec![]);

    let result = fx
        .handler
        .handle(json!({}), InvocationContext::with_request_id("req-1"))
        .await;

    assert_eq!(result.status_code, 200);
    assert_eq!(result.message().as_deref(), Some("No backup jobs found."));
    assert!(fx.sink.sent().is_empty());
}

#[tokio::test]
async fn send_failure_returns_500_with_error_text() {
    let fx = Fixture::new(vec![ec2_job("i-web", BackupJobState::Running)]);
    fx.directory.insert(InstanceDescriptor::new("i-web"));
    fx.sink
        .fail_with(DeliveryError::Service("Throttling: rate exceeded".to_string()));

    let result = fx
        .handler
        .handle_on(json!(null), InvocationContext::new(), report_day())
        .await;

    assert_eq!(result.status_code, 500);
    assert_eq!(
        result.message().as_deref(),
        Some("Error occurred: email service error: Throttling: rate exceeded")
    );
}

//! AWS Backup job listing.

use aws_sdk_backup::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_backup::types::BackupJob;
use chrono::{DateTime, Utc};
use tracing::warn;

use backup_report_core::{BackupJobRecord, BackupJobSource, BackupJobState, SourceError};

#[derive(Debug, Clone)]
pub struct AwsBackupJobSource {
    client: aws_sdk_backup::Client,
}

impl AwsBackupJobSource {
    pub fn new(client: aws_sdk_backup::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl BackupJobSource for AwsBackupJobSource {
    async fn list_backup_jobs(&self) -> Result<Vec<BackupJobRecord>, SourceError> {
        let output = self.client.list_backup_jobs().send().await.map_err(|e| {
            SourceError::Service(e.message().map(str::to_string).unwrap_or_else(|| DisplayErrorContext(&e).to_string()))
        })?;

        if output.next_token().is_some() {
            warn!("backup job listing has more pages; only the first page is reported");
        }

        output.backup_jobs().iter().map(to_record).collect()
    }
}

fn to_record(job: &BackupJob) -> Result<BackupJobRecord, SourceError> {
    let job_id = job.backup_job_id().unwrap_or("-");
    let malformed = |field: &str| SourceError::Malformed(format!("job {job_id} has no {field}"));

    let resource = job.resource_arn().ok_or_else(|| malformed("resource arn"))?;
    let state = job.state().ok_or_else(|| malformed("state"))?;
    let created = job.creation_date().ok_or_else(|| malformed("creation date"))?;
    let created_at = DateTime::<Utc>::from_timestamp(created.secs(), created.subsec_nanos())
        .ok_or_else(|| malformed("valid creation date"))?;

    let mut record = BackupJobRecord::new(
        resource,
        BackupJobState::parse(state.as_str()),
        job.resource_type().unwrap_or_default(),
        created_at,
    );
    if let Some(id) = job.backup_job_id() {
        record = record.with_job_id(id);
    }
    if let Some(message) = job.status_message() {
        record = record.with_status_message(message);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_backup::primitives::DateTime as AwsDateTime;
    use aws_sdk_backup::types::BackupJobState as AwsState;

    #[test]
    fn complete_job_maps_every_field() {
        let job = BackupJob::builder()
            .backup_job_id("job-1")
            .resource_arn("arn:aws:ec2:eu-west-1:123:instance/i-1")
            .state(AwsState::Completed)
            .resource_type("EC2")
            .status_message("ok")
            .creation_date(AwsDateTime::from_secs(1_710_028_800))
            .build();

        let record = to_record(&job).unwrap();
        assert_eq!(record.job_id.as_deref(), Some("job-1"));
        assert_eq!(record.state, BackupJobState::Completed);
        assert_eq!(record.resource_type, "EC2");
        assert_eq!(record.status_message.as_deref(), Some("ok"));
        assert_eq!(record.created_at.timestamp(), 1_710_028_800);
    }

    #[test]
    fn job_without_arn_is_malformed() {
        let job = BackupJob::builder()
            .backup_job_id("job-2")
            .state(AwsState::Failed)
            .creation_date(AwsDateTime::from_secs(0))
            .build();

        let err = to_record(&job).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(ref m) if m.contains("job-2")));
    }
}

//! Backup job records as reported by the backup service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{InstanceId, ResourceReference};

/// Placeholder shown when a job carries no status message.
pub const NO_STATUS_MESSAGE: &str = "N/A";

/// Lifecycle state of a backup job.
///
/// Displays using the service's own wording (`COMPLETED`, `FAILED`, ...),
/// which is what operators see in the report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackupJobState {
    Created,
    Pending,
    Running,
    Aborting,
    Aborted,
    Completed,
    Failed,
    Expired,
    Partial,
    /// A state this build does not know about yet.
    #[serde(untagged)]
    Unknown(String),
}

impl BackupJobState {
    pub fn as_str(&self) -> &str {
        match self {
            BackupJobState::Created => "CREATED",
            BackupJobState::Pending => "PENDING",
            BackupJobState::Running => "RUNNING",
            BackupJobState::Aborting => "ABORTING",
            BackupJobState::Aborted => "ABORTED",
            BackupJobState::Completed => "COMPLETED",
            BackupJobState::Failed => "FAILED",
            BackupJobState::Expired => "EXPIRED",
            BackupJobState::Partial => "PARTIAL",
            BackupJobState::Unknown(s) => s,
        }
    }

    /// Parse the service wording. Unrecognised values are kept verbatim.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "CREATED" => BackupJobState::Created,
            "PENDING" => BackupJobState::Pending,
            "RUNNING" => BackupJobState::Running,
            "ABORTING" => BackupJobState::Aborting,
            "ABORTED" => BackupJobState::Aborted,
            "COMPLETED" => BackupJobState::Completed,
            "FAILED" => BackupJobState::Failed,
            "EXPIRED" => BackupJobState::Expired,
            "PARTIAL" => BackupJobState::Partial,
            _ => BackupJobState::Unknown(s.to_string()),
        }
    }
}

impl core::fmt::Display for BackupJobState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One backup attempt as listed by the backup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupJobRecord {
    /// Service-assigned job id, kept for log correlation only.
    pub job_id: Option<String>,
    pub resource: ResourceReference,
    pub state: BackupJobState,
    pub resource_type: String,
    pub status_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BackupJobRecord {
    pub fn new(
        resource: impl Into<ResourceReference>,
        state: BackupJobState,
        resource_type: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            job_id: None,
            resource: resource.into(),
            state,
            resource_type: resource_type.into(),
            status_message: None,
            created_at,
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn with_status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    /// Whether the job was created on `day` (UTC calendar date).
    pub fn created_on(&self, day: NaiveDate) -> bool {
        self.created_at.date_naive() == day
    }

    /// Instance backing this job, if the resource is a compute instance.
    pub fn instance_id(&self) -> Option<InstanceId> {
        self.resource.instance_id()
    }

    pub fn status_message_or_default(&self) -> &str {
        self.status_message.as_deref().unwrap_or(NO_STATUS_MESSAGE)
    }
}

//! Ports to the three external collaborators of a report run.
//!
//! Infrastructure provides the AWS-backed implementations; tests use the
//! in-memory ones. The generator only ever sees these traits.

use serde::{Deserialize, Serialize};

use crate::error::{DeliveryError, LookupError, SourceError};
use crate::id::InstanceId;
use crate::instance::InstanceDescriptor;
use crate::job::BackupJobRecord;

/// Source of backup job records.
#[async_trait::async_trait]
pub trait BackupJobSource: Send + Sync {
    /// List all known backup jobs (single page, no filtering).
    async fn list_backup_jobs(&self) -> Result<Vec<BackupJobRecord>, SourceError>;
}

/// Directory of compute instances.
#[async_trait::async_trait]
pub trait InstanceDirectory: Send + Sync {
    /// Describe one instance.
    ///
    /// Must return `LookupError::NotFound` when no instance matches, so the
    /// caller can skip the job instead of failing the run.
    async fn describe_instance(&self, id: &InstanceId) -> Result<InstanceDescriptor, LookupError>;
}

/// An HTML email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Confirmation returned by the mail service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

/// Outbound notification channel.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, DeliveryError>;
}

#[async_trait::async_trait]
impl<T: BackupJobSource + ?Sized> BackupJobSource for std::sync::Arc<T> {
    async fn list_backup_jobs(&self) -> Result<Vec<BackupJobRecord>, SourceError> {
        (**self).list_backup_jobs().await
    }
}

#[async_trait::async_trait]
impl<T: InstanceDirectory + ?Sized> InstanceDirectory for std::sync::Arc<T> {
    async fn describe_instance(&self, id: &InstanceId) -> Result<InstanceDescriptor, LookupError> {
        (**self).describe_instance(id).await
    }
}

#[async_trait::async_trait]
impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, DeliveryError> {
        (**self).send(message).await
    }
}

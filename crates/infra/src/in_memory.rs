//! In-memory port implementations for tests/dev.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};

use backup_report_core::{
    BackupJobRecord, BackupJobSource, DeliveryError, DeliveryReceipt, EmailMessage,
    InstanceDescriptor, InstanceDirectory, InstanceId, LookupError, NotificationSink, SourceError,
};

/// Job source returning a fixed listing (or a fixed failure).
#[derive(Debug, Default)]
pub struct InMemoryBackupJobSource {
    jobs: RwLock<Vec<BackupJobRecord>>,
    failure: RwLock<Option<SourceError>>,
}

impl InMemoryBackupJobSource {
    pub fn new(jobs: Vec<BackupJobRecord>) -> Self {
        Self {
            jobs: RwLock::new(jobs),
            failure: RwLock::new(None),
        }
    }

    /// Make every subsequent listing fail with `error`.
    pub fn fail_with(&self, error: SourceError) {
        *self.failure.write().unwrap() = Some(error);
    }
}

#[async_trait::async_trait]
impl BackupJobSource for InMemoryBackupJobSource {
    async fn list_backup_jobs(&self) -> Result<Vec<BackupJobRecord>, SourceError> {
        if let Some(e) = self.failure.read().unwrap().clone() {
            return Err(e);
        }
        Ok(self.jobs.read().unwrap().clone())
    }
}

/// Instance directory backed by a map; unknown ids are `NotFound`.
#[derive(Debug, Default)]
pub struct InMemoryInstanceDirectory {
    instances: RwLock<HashMap<InstanceId, InstanceDescriptor>>,
    broken: RwLock<HashSet<InstanceId>>,
    lookups: Mutex<Vec<InstanceId>>,
}

impl InMemoryInstanceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, instance: InstanceDescriptor) {
        self.instances
            .write()
            .unwrap()
            .insert(instance.id.clone(), instance);
    }

    /// Make lookups of `id` fail with a service error instead of `NotFound`.
    pub fn break_lookup(&self, id: impl Into<InstanceId>) {
        self.broken.write().unwrap().insert(id.into());
    }

    /// Every id looked up so far, in call order.
    pub fn lookups(&self) -> Vec<InstanceId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl InstanceDirectory for InMemoryInstanceDirectory {
    async fn describe_instance(&self, id: &InstanceId) -> Result<InstanceDescriptor, LookupError> {
        self.lookups.lock().unwrap().push(id.clone());

        if self.broken.read().unwrap().contains(id) {
            return Err(LookupError::Service(format!(
                "not authorized to describe instance {id}"
            )));
        }
        self.instances
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.clone()))
    }
}

/// Notification sink that records every message instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    sent: Mutex<Vec<EmailMessage>>,
    failure: RwLock<Option<DeliveryError>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with `error`.
    pub fn fail_with(&self, error: DeliveryError) {
        *self.failure.write().unwrap() = Some(error);
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, DeliveryError> {
        if let Some(e) = self.failure.read().unwrap().clone() {
            return Err(e);
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message);
        Ok(DeliveryReceipt {
            message_id: format!("local-{}", sent.len()),
        })
    }
}

//! `backup-report-core` — domain model for the daily instance backup report.
//!
//! This crate contains **pure domain** logic (no AWS or runtime concerns):
//! backup job records, report rows and their HTML rendering, the ports the
//! report talks through, and the generator that drives a single run.

pub mod error;
pub mod generator;
pub mod id;
pub mod instance;
pub mod job;
pub mod ports;
pub mod report;

pub use error::{DeliveryError, LookupError, ReportError, ReportResult, SourceError};
pub use generator::{
    EmptyReportPolicy, InvocationResult, ReportGenerator, ReportOutcome, ReportSettings,
};
pub use id::{InstanceId, ResourceReference};
pub use instance::InstanceDescriptor;
pub use job::{BackupJobRecord, BackupJobState};
pub use ports::{BackupJobSource, DeliveryReceipt, EmailMessage, InstanceDirectory, NotificationSink};
pub use report::{BackupReport, ReportRow};

//! Infrastructure layer: configuration and adapters for the report ports.

pub mod aws;
pub mod config;
pub mod in_memory;


pub use config::{ConfigError, ReportConfig, ServiceRegions};
pub use in_memory::{InMemoryBackupJobSource, InMemoryInstanceDirectory, RecordingNotificationSink};

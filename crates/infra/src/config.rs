//! Configuration loading and representation.
//!
//! Everything is fixed per deployment and read once at startup from the
//! environment. Credentials are not configured here; the AWS default
//! provider chain of the hosting environment supplies them.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use backup_report_core::generator::DEFAULT_SUBJECT;
use backup_report_core::{EmptyReportPolicy, ReportSettings};

pub const ENV_SENDER: &str = "BACKUP_REPORT_SENDER";
pub const ENV_RECIPIENT: &str = "BACKUP_REPORT_RECIPIENT";
pub const ENV_SUBJECT: &str = "BACKUP_REPORT_SUBJECT";
pub const ENV_EMPTY_POLICY: &str = "BACKUP_REPORT_EMPTY_POLICY";
pub const ENV_REGION: &str = "BACKUP_REPORT_REGION";
pub const ENV_BACKUP_REGION: &str = "BACKUP_REPORT_BACKUP_REGION";
pub const ENV_EC2_REGION: &str = "BACKUP_REPORT_EC2_REGION";
pub const ENV_SES_REGION: &str = "BACKUP_REPORT_SES_REGION";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Region per service. `None` defers to the SDK's default region chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceRegions {
    pub backup: Option<String>,
    pub ec2: Option<String>,
    pub ses: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportConfig {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub empty_policy: EmptyReportPolicy,
    pub regions: ServiceRegions,
}

impl ReportConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let sender = get(ENV_SENDER).ok_or(ConfigError::Missing(ENV_SENDER))?;
        validate_address(ENV_SENDER, &sender)?;
        let recipient = get(ENV_RECIPIENT).ok_or(ConfigError::Missing(ENV_RECIPIENT))?;
        validate_address(ENV_RECIPIENT, &recipient)?;

        let subject = get(ENV_SUBJECT).unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        let empty_policy = match get(ENV_EMPTY_POLICY) {
            Some(raw) => EmptyReportPolicy::parse(&raw).ok_or_else(|| ConfigError::Invalid {
                key: ENV_EMPTY_POLICY,
                reason: format!(
                    "{raw:?} (expected skip_when_no_jobs, always_send or skip_when_empty)"
                ),
            })?,
            None => EmptyReportPolicy::default(),
        };

        let shared = get(ENV_REGION);
        let regions = ServiceRegions {
            backup: get(ENV_BACKUP_REGION).or_else(|| shared.clone()),
            ec2: get(ENV_EC2_REGION).or_else(|| shared.clone()),
            ses: get(ENV_SES_REGION).or_else(|| shared.clone()),
        };
        if regions == ServiceRegions::default() {
            warn!("no report regions configured; using the SDK default region");
        }

        Ok(Self {
            sender,
            recipient,
            subject,
            empty_policy,
            regions,
        })
    }

    pub fn settings(&self) -> ReportSettings {
        ReportSettings::new(self.sender.clone(), self.recipient.clone())
            .with_subject(self.subject.clone())
            .with_empty_policy(self.empty_policy)
    }
}

fn validate_address(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            reason: format!("{value:?} is not an email address"),
        })
    }
}

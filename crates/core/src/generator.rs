//! The report run: list → filter → resolve → render → send.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::ReportResult;
use crate::job::BackupJobRecord;
use crate::ports::{BackupJobSource, DeliveryReceipt, EmailMessage, InstanceDirectory, NotificationSink};
use crate::report::{BackupReport, ReportRow};

/// Default email subject.
pub const DEFAULT_SUBJECT: &str = "EC2 Backup Job Statuses";

const MSG_NO_JOBS: &str = "No backup jobs found.";
const MSG_NOTHING_TO_REPORT: &str = "No EC2 backup jobs found for today; no email sent.";
const MSG_SENT: &str = "Backup job status fetched and email sent successfully";

/// What to do when a run has nothing to show.
///
/// - `SkipWhenNoJobs`: an empty job listing sends nothing; a listing whose
///   jobs are all filtered out still sends the placeholder table.
/// - `AlwaysSend`: every run sends an email.
/// - `SkipWhenEmpty`: no email unless there is at least one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReportPolicy {
    #[default]
    SkipWhenNoJobs,
    AlwaysSend,
    SkipWhenEmpty,
}

impl EmptyReportPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "skip_when_no_jobs" => Some(Self::SkipWhenNoJobs),
            "always_send" => Some(Self::AlwaysSend),
            "skip_when_empty" => Some(Self::SkipWhenEmpty),
            _ => None,
        }
    }
}

/// Fixed per-deployment settings of a report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub empty_policy: EmptyReportPolicy,
}

impl ReportSettings {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            subject: DEFAULT_SUBJECT.to_string(),
            empty_policy: EmptyReportPolicy::default(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_empty_policy(mut self, policy: EmptyReportPolicy) -> Self {
        self.empty_policy = policy;
        self
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The backup service listed no jobs at all; nothing was sent.
    NoJobs,
    /// No row survived filtering and the policy suppresses empty emails.
    NothingToReport,
    /// The report email was delivered.
    Sent { receipt: DeliveryReceipt, rows: usize },
}

impl ReportOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ReportOutcome::NoJobs => MSG_NO_JOBS,
            ReportOutcome::NothingToReport => MSG_NOTHING_TO_REPORT,
            ReportOutcome::Sent { .. } => MSG_SENT,
        }
    }

    pub fn email_sent(&self) -> bool {
        matches!(self, ReportOutcome::Sent { .. })
    }
}

/// HTTP-style result handed back to the invoker.
///
/// `body` is always a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::with_status(200, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_status(500, message)
    }

    fn with_status(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            body: serde_json::Value::String(message.into()).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// The message carried in `body`, decoded from its JSON string form.
    pub fn message(&self) -> Option<String> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Drives one report run against the three ports.
pub struct ReportGenerator<S, D, N> {
    source: S,
    directory: D,
    sink: N,
    settings: ReportSettings,
}

impl<S, D, N> ReportGenerator<S, D, N>
where
    S: BackupJobSource,
    D: InstanceDirectory,
    N: NotificationSink,
{
    pub fn new(source: S, directory: D, sink: N, settings: ReportSettings) -> Self {
        Self {
            source,
            directory,
            sink,
            settings,
        }
    }

    /// Run the report for `today` and convert the result for the invoker.
    ///
    /// Never fails: errors are logged and become a 500 result.
    pub async fn invoke_for(&self, today: NaiveDate) -> InvocationResult {
        match self.run_for(today).await {
            Ok(outcome) => InvocationResult::ok(outcome.message()),
            Err(e) => {
                error!(error = %e, "backup report failed");
                InvocationResult::error(format!("Error occurred: {e}"))
            }
        }
    }

    /// Run the report for `today`.
    pub async fn run_for(&self, today: NaiveDate) -> ReportResult<ReportOutcome> {
        let jobs = self.source.list_backup_jobs().await?;
        info!(jobs = jobs.len(), %today, "listed backup jobs");

        if jobs.is_empty() && self.settings.empty_policy != EmptyReportPolicy::AlwaysSend {
            info!("no backup jobs found");
            return Ok(ReportOutcome::NoJobs);
        }

        let report = self.collect(&jobs, today).await?;

        if report.is_empty() && self.settings.empty_policy == EmptyReportPolicy::SkipWhenEmpty {
            info!("no instance backup jobs for today; skipping email");
            return Ok(ReportOutcome::NothingToReport);
        }

        let rows = report.len();
        let receipt = self.sink.send(self.compose(&report)).await?;
        info!(message_id = %receipt.message_id, date = %report.date, rows, "report email sent");

        Ok(ReportOutcome::Sent { receipt, rows })
    }

    /// Build the day's rows from the job listing, preserving job order.
    pub async fn collect(&self, jobs: &[BackupJobRecord], today: NaiveDate) -> ReportResult<BackupReport> {
        let mut report = BackupReport::new(today);

        for job in jobs {
            if !job.created_on(today) {
                continue;
            }

            if !job.resource.is_instance() {
                debug!(resource = %job.resource, "skipping non-instance backup job");
                continue;
            }
            let Some(instance_id) = job.instance_id() else {
                warn!(
                    resource = %job.resource,
                    job_id = job.job_id.as_deref().unwrap_or("-"),
                    "instance backup job has no instance id; skipping"
                );
                continue;
            };

            let instance = match self.directory.describe_instance(&instance_id).await {
                Ok(instance) => instance,
                Err(e) if e.is_not_found() => {
                    warn!(
                        instance_id = %instance_id,
                        job_id = job.job_id.as_deref().unwrap_or("-"),
                        "instance not found, it might have been terminated"
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let row = ReportRow::from_job(job, &instance);
            info!(
                instance_name = %row.instance_name,
                backup_status = %row.backup_status,
                "resolved backup job"
            );
            report.push(row);
        }

        Ok(report)
    }

    fn compose(&self, report: &BackupReport) -> EmailMessage {
        EmailMessage {
            sender: self.settings.sender.clone(),
            recipients: vec![self.settings.recipient.clone()],
            subject: self.settings.subject.clone(),
            html_body: report.to_html(),
        }
    }
}

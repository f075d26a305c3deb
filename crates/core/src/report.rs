//! Report rows and HTML rendering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::instance::InstanceDescriptor;
use crate::job::BackupJobRecord;

/// Heading of the rendered report.
pub const REPORT_HEADING: &str = "Backup Job Statuses";

/// Column headers, in render order.
pub const COLUMNS: [&str; 5] = [
    "VM Name",
    "Backup Status",
    "Resource ID",
    "Resource Type",
    "Message Category",
];

/// Text of the single row rendered when there is nothing to show.
pub const EMPTY_ROW_TEXT: &str = "No EC2 backup jobs found for today.";

const HEADER_STYLE: &str = "background-color:#0096FF;color:white;";

/// One line of the report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub instance_name: String,
    pub backup_status: String,
    pub resource_id: String,
    pub resource_type: String,
    pub message_category: String,
}

impl ReportRow {
    /// Combine a backup job with the instance it protected.
    pub fn from_job(job: &BackupJobRecord, instance: &InstanceDescriptor) -> Self {
        Self {
            instance_name: instance.name().to_string(),
            backup_status: job.state.to_string(),
            resource_id: instance.id.to_string(),
            resource_type: job.resource_type.clone(),
            message_category: job.status_message_or_default().to_string(),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [
            &self.instance_name,
            &self.backup_status,
            &self.resource_id,
            &self.resource_type,
            &self.message_category,
        ]
    }
}

/// Rows collected for one day, in backup-job order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupReport {
    pub date: NaiveDate,
    pub rows: Vec<ReportRow>,
}

impl BackupReport {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Render the report as an HTML fragment suitable for an email body.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(256 + self.rows.len() * 160);
        html.push_str("<h1>");
        html.push_str(REPORT_HEADING);
        html.push_str("</h1>");

        html.push_str("<table border='1'><tr style='");
        html.push_str(HEADER_STYLE);
        html.push_str("'>");
        for column in COLUMNS {
            html.push_str("<th>");
            html.push_str(column);
            html.push_str("</th>");
        }
        html.push_str("</tr>");

        if self.rows.is_empty() {
            html.push_str("<tr><td colspan='");
            html.push_str(&COLUMNS.len().to_string());
            html.push_str("'>");
            html.push_str(EMPTY_ROW_TEXT);
            html.push_str("</td></tr>");
        }
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row.cells() {
                html.push_str("<td>");
                push_escaped(&mut html, cell);
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }

        html.push_str("</table>");
        html
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

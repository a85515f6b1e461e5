use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PollingError;

/// Latest status response of a backup job. Every poll replaces the previous one.
pub type Snapshot = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Confluence,
    Jira,
}

impl Product {
    pub(crate) fn start_path(&self) -> &'static str {
        match self {
            Product::Confluence => "/wiki/rest/obm/1.0/runbackup",
            Product::Jira => "/rest/backup/1/export/runbackup",
        }
    }

    pub(crate) fn progress_path(&self) -> &'static str {
        match self {
            Product::Confluence => "/wiki/rest/obm/1.0/getprogress",
            Product::Jira => "/rest/backup/1/export/getProgress",
        }
    }

    /// Field whose presence in a snapshot marks the job as finished.
    pub(crate) fn terminal_field(&self) -> &'static str {
        match self {
            Product::Confluence => "fileName",
            Product::Jira => "result",
        }
    }

    pub(crate) fn download_url(&self, tenant: &str, terminal_value: &str) -> String {
        match self {
            Product::Confluence => format!("https://{tenant}/wiki/download/{terminal_value}"),
            Product::Jira => format!("https://{tenant}/plugins/servlet/{terminal_value}"),
        }
    }

    pub(crate) fn progress_line(&self, snapshot: &Snapshot) -> Result<String, PollingError> {
        match self {
            Product::Confluence => Ok(format!(
                "Current status: {percentage}; {status}",
                percentage = field(snapshot, "alternativePercentage")?,
                status = field(snapshot, "currentStatus")?,
            )),
            Product::Jira => Ok(format!(
                "Current status: {status} {progress}; {description}",
                status = field(snapshot, "status")?,
                progress = field(snapshot, "progress")?,
                description = field(snapshot, "description")?,
            )),
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Product::Confluence => f.write_str("Confluence"),
            Product::Jira => f.write_str("Jira"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRequest {
    #[serde(rename = "cbAttachments")]
    pub(crate) include_attachments: bool,
    pub(crate) export_to_cloud: bool,
}

impl BackupRequest {
    pub(crate) fn from(include_attachments: bool) -> BackupRequest {
        BackupRequest { include_attachments, export_to_cloud: true }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum JobState {
    InProgress,
    Complete(String),
}

impl JobState {
    pub fn of(product: Product, snapshot: &Snapshot) -> JobState {
        match snapshot.get(product.terminal_field()) {
            Some(value) => JobState::Complete(text(value)),
            None => JobState::InProgress,
        }
    }
}

/// Local name of a downloaded backup: `DDMMYYYY_HHMM_<last url segment>.zip`.
pub fn local_file_name<Tz: TimeZone>(url: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let tail = url.rsplit('/').next().unwrap_or(url).replace("?fileId=", "");
    format!("{stamp}_{tail}.zip", stamp = now.format("%d%m%Y_%H%M"))
}

/// Job ids and file names come back as strings or numbers depending on the product.
pub(crate) fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn field(snapshot: &Snapshot, name: &'static str) -> Result<String, PollingError> {
    snapshot.get(name).map(text).ok_or(PollingError::MissingField(name))
}

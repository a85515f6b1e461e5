use std::io;
use std::path::PathBuf;

use indicatif::style::TemplateError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error("Something went wrong starting the backup. Status code: {status}. Body: {body}")]
  BackupStart { status: StatusCode, body: String },
  #[error(transparent)]
  Http(#[from] reqwest::Error),
  #[error(transparent)]
  Polling(#[from] PollingError),
  #[error(transparent)]
  Download(#[from] DownloadError),
  #[error(transparent)]
  Progress(#[from] TemplateError),
}

impl Error {
  /// Short category name, used as the `kind` field of the log line.
  pub fn kind(&self) -> &'static str {
    match self {
      Error::Config(_) => "configuration",
      Error::BackupStart { .. } | Error::Http(_) => "backup-start",
      Error::Polling(_) => "polling",
      Error::Download(_) => "download",
      Error::Progress(_) => "progress",
    }
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Could not read config file `{path}`: {source}")]
  Read { path: PathBuf, source: io::Error },
  #[error("Could not write config file `{path}`: {source}")]
  Write { path: PathBuf, source: io::Error },
  #[error("Config file `{path}` is malformed: {source}")]
  Parse { path: PathBuf, source: serde_yaml::Error },
  #[error("Could not serialize the config: {0}")]
  Serialize(serde_yaml::Error),
  #[error("Tenant is still set to `{0}`. Edit config.yaml or run the backup with the \"-w\" flag")]
  Placeholder(String),
  #[error("Could not read answer from the terminal: {0}")]
  Prompt(io::Error),
  #[error("Could not locate the executable directory: {0}")]
  RootDir(io::Error),
}

#[derive(Debug, Error)]
pub enum PollingError {
  #[error("Something went wrong checking the backup status: {0}")]
  Request(reqwest::Error),
  #[error("Something went wrong checking the backup status. Status code: {status}. Body: {body}")]
  Status { status: StatusCode, body: String },
  #[error("Backup status is not a valid JSON object: {0}")]
  Json(serde_json::Error),
  #[error("Backup status does not contain the `{0}` field")]
  MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum DownloadError {
  #[error("Something went wrong downloading the backup: {0}")]
  Request(#[from] reqwest::Error),
  #[error("Something went wrong downloading the backup. Try to download at: {url}. Status code: {status}")]
  Status { url: String, status: StatusCode },
  #[error("Could not create `{path}`: {source}")]
  Create { path: PathBuf, source: io::Error },
  #[error("Could not write the backup file: {0}")]
  Write(#[from] io::Error),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn given_start_failure_when_display_then_status_and_body_are_shown() {
    let error = Error::BackupStart {
      status: StatusCode::UNAUTHORIZED,
      body: "bad credentials".to_string(),
    };

    assert_eq!(
      error.to_string(),
      "Something went wrong starting the backup. Status code: 401 Unauthorized. Body: bad credentials"
    );
    assert_eq!(error.kind(), "backup-start");
  }

  #[test]
  fn given_nested_errors_when_kind_then_category_of_the_stage() {
    let config: Error = ConfigError::Placeholder("something.atlassian.net".to_string()).into();
    let polling: Error = PollingError::MissingField("fileName").into();
    let download: Error = DownloadError::Write(io::Error::other("disk full")).into();

    assert_eq!(config.kind(), "configuration");
    assert_eq!(polling.kind(), "polling");
    assert_eq!(download.kind(), "download");
    assert_eq!(polling.to_string(), "Backup status does not contain the `fileName` field");
  }
}

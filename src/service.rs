use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use futures::{Stream, StreamExt};
use indicatif::ProgressBar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::clock::{Clock, TokioClock};
use crate::config::Config;
use crate::error::{DownloadError, Error, PollingError};
use crate::model::{self, BackupRequest, JobState, Product, Snapshot};
use crate::progress::{Phase, SpinnerHelper};

pub const POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024;

#[async_trait]
pub trait BackupLoader {
    /// Runs a whole backup of `product` and returns the path of the downloaded archive.
    async fn get_backup(&self, product: Product) -> Result<PathBuf, Error>;
}

pub struct BackupService<C = TokioClock> {
    client: Client,
    config: Config,
    api_url: String,
    backups_dir: PathBuf,
    clock: C,
    poll_interval: Duration,
}

#[async_trait]
impl<C: Clock> BackupLoader for BackupService<C> {
    async fn get_backup(&self, product: Product) -> Result<PathBuf, Error> {
        let task_id = self.start_backup(product).await?;

        let check_status_spinner =
            SpinnerHelper::create(Phase::Polling, format!("Check status of the {product} backup"))?;
        let download_url = self
            .await_completion(product, task_id.as_deref(), &check_status_spinner)
            .await?;
        println!("-> Backup URL: {download_url}");

        let file_name = model::local_file_name(&download_url, &Local::now());
        let download_spinner = SpinnerHelper::create(Phase::Download, format!("Download {product} backup"))?;

        self.download(&download_url, &file_name, &download_spinner).await
    }
}

impl BackupService<TokioClock> {
    pub fn new(config: Config, backups_dir: PathBuf) -> Result<BackupService<TokioClock>, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(headers).build()?;

        Ok(BackupService {
            client,
            api_url: format!("https://{tenant}", tenant = config.tenant),
            config,
            backups_dir,
            clock: TokioClock,
            poll_interval: POLL_INTERVAL,
        })
    }
}

impl<C: Clock> BackupService<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> BackupService<D> {
        BackupService {
            client: self.client,
            config: self.config,
            api_url: self.api_url,
            backups_dir: self.backups_dir,
            clock,
            poll_interval: self.poll_interval,
        }
    }

    /// Sends the start and status calls to `api_url` instead of the tenant host.
    /// Download URLs are still built from the tenant.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.config.email, Some(&self.config.api_token))
    }

    pub async fn start_backup(&self, product: Product) -> Result<Option<String>, Error> {
        info!(%product, "Starting backup");

        let response = self
            .authorized(self.client.post(format!("{url}{path}", url = self.api_url, path = product.start_path())))
            .json(&BackupRequest::from(self.config.includes_attachments()))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(Error::BackupStart { status, body });
        }

        match product {
            Product::Confluence => {
                println!("-> Backup process successfully started");
                Ok(None)
            }
            Product::Jira => {
                let task_id = serde_json::from_str::<Value>(&body)
                    .ok()
                    .and_then(|started| started.get("taskId").map(model::text));
                match task_id {
                    Some(task_id) => {
                        println!("-> Backup process successfully started: taskId={task_id}");
                        info!(%task_id, "Backup started");
                        Ok(Some(task_id))
                    }
                    None => Err(Error::BackupStart { status, body }),
                }
            }
        }
    }

    /// Polls until the vendor reports the job as done. There is no upper bound on the
    /// number of polls.
    pub async fn await_completion(
        &self,
        product: Product,
        task_id: Option<&str>,
        spinner: &ProgressBar,
    ) -> Result<String, Error> {
        let result = self.poll_until_complete(product, task_id, spinner).await;
        if result.is_err() {
            spinner.abandon_with_message(format!("FAILURE – Could not check the {product} backup status."));
        }
        result
    }

    async fn poll_until_complete(
        &self,
        product: Product,
        task_id: Option<&str>,
        spinner: &ProgressBar,
    ) -> Result<String, Error> {
        loop {
            self.clock.sleep(self.poll_interval).await;
            let snapshot = self.check_backup_status(product, task_id).await?;

            match JobState::of(product, &snapshot) {
                JobState::InProgress => {
                    let line = product.progress_line(&snapshot)?;
                    spinner.println(&line);
                    spinner.set_message(line);
                }
                JobState::Complete(terminal_value) => {
                    if let Ok(line) = product.progress_line(&snapshot) {
                        spinner.println(line);
                    }
                    spinner.finish_with_message(format!("SUCCESS – {product} backup is ready."));
                    info!(%product, "Backup completed");
                    return Ok(product.download_url(&self.config.tenant, &terminal_value));
                }
            }
        }
    }

    async fn check_backup_status(
        &self,
        product: Product,
        task_id: Option<&str>,
    ) -> Result<Snapshot, PollingError> {
        let mut request = self.authorized(
            self.client
                .get(format!("{url}{path}", url = self.api_url, path = product.progress_path())),
        );
        if let Some(task_id) = task_id {
            request = request.query(&[("taskId", task_id)]);
        }

        let response = request.send().await.map_err(PollingError::Request)?;
        let status = response.status();
        let body = response.text().await.map_err(PollingError::Request)?;
        if !status.is_success() {
            return Err(PollingError::Status { status, body });
        }

        serde_json::from_str::<Snapshot>(&body).map_err(PollingError::Json)
    }

    pub async fn download(
        &self,
        url: &str,
        file_name: &str,
        spinner: &ProgressBar,
    ) -> Result<PathBuf, Error> {
        println!("-> Downloading file from URL: {url}");

        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(DownloadError::Request)?;

        if !response.status().is_success() {
            spinner.abandon_with_message("FAILURE – Backup could not be downloaded.");
            return Err(DownloadError::Status { url: url.to_string(), status: response.status() }.into());
        }

        let path = self.backups_dir.join(file_name);
        spinner.set_message(format!("PROGRESS – Writing {file_name}"));
        let written = match save_stream(&path, Box::pin(response.bytes_stream())).await {
            Ok(written) => written,
            Err(error) => {
                spinner.abandon_with_message("FAILURE – Backup could not be downloaded.");
                return Err(error.into());
            }
        };
        spinner.finish_with_message(format!("SUCCESS – Backup downloaded ({written} bytes)."));
        info!(path = %path.display(), bytes = written, "Backup downloaded");

        Ok(path)
    }
}

/// Writes `stream` to a new file at `path`. A partially written file is removed again,
/// so only complete backups are left in the backups directory.
pub(crate) async fn save_stream<S, B, E>(path: &Path, stream: S) -> Result<u64, DownloadError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<DownloadError>,
{
    let file = File::create(path)
        .await
        .map_err(|source| DownloadError::Create { path: path.to_path_buf(), source })?;

    match write_chunks(stream, file).await {
        Ok(written) => Ok(written),
        Err(error) => {
            if let Err(remove_error) = tokio::fs::remove_file(path).await {
                warn!(path = %path.display(), %remove_error, "Could not remove incomplete backup");
            }
            Err(error)
        }
    }
}

/// Writes every non-empty chunk of `stream` to `out` in order, in pieces of at most
/// [`DOWNLOAD_CHUNK_SIZE`] bytes. Returns the number of bytes written.
pub(crate) async fn write_chunks<S, B, E, W>(mut stream: S, mut out: W) -> Result<u64, DownloadError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<DownloadError>,
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::<DownloadError>::into)?;
        for piece in chunk.as_ref().chunks(DOWNLOAD_CHUNK_SIZE) {
            out.write_all(piece).await?;
            written += piece.len() as u64;
        }
    }
    out.flush().await?;
    Ok(written)
}

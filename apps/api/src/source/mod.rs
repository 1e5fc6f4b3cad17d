//! Job Sources — where the board's job records come from.
//!
//! `JobSource` is the single seam between the board and the outside world.
//! `HttpJobSource` talks to the upstream feed and `FileJobSource` reads a
//! local JSON export. Either can be wrapped in `CachedJobSource`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::JobRecord;

pub mod cache;
pub mod handlers;

pub use cache::CachedJobSource;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Supplies the full, ordered list of open job records.
///
/// Carried as `Arc<dyn JobSource>` by the board handle and the service state.
/// Any failure (transport, non-success status, bad payload) is an `Err`.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, SourceError>;
}

#[async_trait]
impl<S: JobSource + ?Sized> JobSource for Arc<S> {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, SourceError> {
        (**self).fetch_jobs().await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HttpJobSource
// ────────────────────────────────────────────────────────────────────────────

/// Fetches the job list from an upstream HTTP endpoint.
///
/// When an API key is configured it is sent as HTTP Basic credentials with
/// the key as username and `x` as password.
#[derive(Clone)]
pub struct HttpJobSource {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpJobSource {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
            api_key,
        })
    }

    #[cfg(test)]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, SourceError> {
        let mut request = self
            .client
            .get(&self.url)
            .header("accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.basic_auth(key, Some("x"));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Job feed returned {}: {}", status, body);
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let jobs: Vec<JobRecord> = serde_json::from_str(&body)?;
        debug!("Fetched {} jobs from {}", jobs.len(), self.url);
        Ok(jobs)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FileJobSource
// ────────────────────────────────────────────────────────────────────────────

/// Reads the job list from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileJobSource {
    path: PathBuf,
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobSource for FileJobSource {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, SourceError> {
        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StaticJobSource
// ────────────────────────────────────────────────────────────────────────────

/// Serves a fixed, replaceable list of jobs.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct StaticJobSource {
    jobs: tokio::sync::RwLock<Vec<JobRecord>>,
}

#[cfg(test)]
impl StaticJobSource {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: tokio::sync::RwLock::new(jobs),
        }
    }

    pub async fn replace(&self, jobs: Vec<JobRecord>) {
        *self.jobs.write().await = jobs;
    }
}

#[cfg(test)]
#[async_trait]
impl JobSource for StaticJobSource {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, SourceError> {
        Ok(self.jobs.read().await.clone())
    }
}

//! Time-bounded cache in front of any `JobSource`.
//!
//! Successful fetches are served from memory until the TTL lapses. Failures
//! are never cached, so the next caller retries upstream. `reset()` drops the
//! cached list immediately.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::models::JobRecord;
use crate::source::{JobSource, SourceError};

/// Upstream listings are revalidated twice a day.
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

struct CachedJobs {
    jobs: Vec<JobRecord>,
    fetched_at: Instant,
}

pub struct CachedJobSource<S> {
    inner: S,
    ttl: Duration,
    entry: RwLock<Option<CachedJobs>>,
}

impl<S: JobSource> CachedJobSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops the cached list so the next fetch goes upstream.
    pub async fn reset(&self) {
        self.entry.write().await.take();
        info!("Job cache reset");
    }

    /// Returns true if a fresh (non-expired) list is cached.
    #[cfg(test)]
    pub async fn is_warm(&self) -> bool {
        self.entry
            .read()
            .await
            .as_ref()
            .is_some_and(|cached| cached.fetched_at.elapsed() < self.ttl)
    }
}

#[async_trait]
impl<S: JobSource> JobSource for CachedJobSource<S> {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, SourceError> {
        if let Some(cached) = self.entry.read().await.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                debug!("Serving {} jobs from cache", cached.jobs.len());
                return Ok(cached.jobs.clone());
            }
        }

        let jobs = self.inner.fetch_jobs().await?;
        *self.entry.write().await = Some(CachedJobs {
            jobs: jobs.clone(),
            fetched_at: Instant::now(),
        });
        Ok(jobs)
    }
}

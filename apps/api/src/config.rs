use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::board::slots::{parse_slot_list, SlotName};
use crate::source::cache::DEFAULT_TTL;

/// Where the service reads its job list from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSourceConfig {
    Http {
        url: String,
        api_key: Option<String>,
        timeout: Duration,
    },
    File(PathBuf),
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub job_source: JobSourceConfig,
    pub cache_ttl: Duration,
    /// Slots the host page provides; the board validates these at init.
    pub board_slots: Vec<SlotName>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let job_source = match (lookup("JOB_SOURCE_FILE"), lookup("JOB_SOURCE_URL")) {
            (Some(path), _) => JobSourceConfig::File(PathBuf::from(path)),
            (None, Some(url)) => JobSourceConfig::Http {
                url,
                api_key: lookup("JOB_SOURCE_API_KEY").filter(|key| !key.is_empty()),
                timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "JOB_SOURCE_TIMEOUT_SECS",
                    30,
                )?),
            },
            (None, None) => {
                bail!("Required environment variable 'JOB_SOURCE_URL' is not set (or set JOB_SOURCE_FILE)")
            }
        };

        let board_slots = match lookup("BOARD_SLOTS") {
            Some(raw) => parse_slot_list(&raw).context("BOARD_SLOTS must list known slot names")?,
            None => SlotName::ALL.to_vec(),
        };

        Ok(Config {
            job_source,
            cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "JOB_CACHE_TTL_SECS",
                DEFAULT_TTL.as_secs(),
            )?),
            board_slots,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    match lookup(key) {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds")),
        None => Ok(default),
    }
}

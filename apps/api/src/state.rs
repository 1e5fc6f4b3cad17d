use std::sync::Arc;

use crate::board::BoardHandle;
use crate::config::Config;
use crate::source::{CachedJobSource, JobSource};

pub type JobCache = CachedJobSource<Arc<dyn JobSource>>;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    #[allow(dead_code)]
    pub config: Config,
    /// Cached job feed; also the board's job source.
    pub jobs: Arc<JobCache>,
    /// `None` when the board failed to initialize; the job feed still serves.
    pub board: Option<BoardHandle>,
}

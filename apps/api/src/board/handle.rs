use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::board::snapshot::{BoardSnapshot, SnapshotRenderer};
use crate::board::view_model::{BoardError, JobBoard, LoadOutcome};
use crate::source::JobSource;

/// Shared, cloneable handle to an initialized job board.
///
/// Returned by `BoardHandle::init` and held by whoever hosts the board; it is
/// the only way to trigger a refresh. The source is awaited outside the lock,
/// so navigation stays responsive while a refresh is in flight.
#[derive(Clone)]
pub struct BoardHandle {
    board: Arc<Mutex<JobBoard<SnapshotRenderer>>>,
    source: Arc<dyn JobSource>,
}

/// Board state as served to the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub current_page: usize,
    pub total_pages: usize,
    pub filter: Option<String>,
    pub departments: Vec<String>,
    pub total_jobs: usize,
    pub filtered_jobs: usize,
    #[serde(flatten)]
    pub snapshot: BoardSnapshot,
}

impl BoardView {
    fn of(board: &JobBoard<SnapshotRenderer>) -> Self {
        Self {
            current_page: board.current_page(),
            total_pages: board.total_pages(),
            filter: board.current_filter().map(str::to_string),
            departments: board.departments().to_vec(),
            total_jobs: board.jobs().len(),
            filtered_jobs: board.filtered_jobs().len(),
            snapshot: board.renderer().snapshot().clone(),
        }
    }
}

impl BoardHandle {
    /// Validates slots, runs the first load and hands back the handle.
    ///
    /// A failed first load still yields a handle; the board stays empty
    /// until a later `refresh` succeeds.
    pub async fn init(
        renderer: SnapshotRenderer,
        source: Arc<dyn JobSource>,
    ) -> Result<Self, BoardError> {
        let board = JobBoard::init(renderer)?;
        let handle = Self {
            board: Arc::new(Mutex::new(board)),
            source,
        };
        handle.refresh().await;
        Ok(handle)
    }

    pub async fn refresh(&self) -> LoadOutcome {
        let ticket = self.board.lock().await.begin_load();
        let result = self.source.fetch_jobs().await;
        self.board.lock().await.complete_load(ticket, result)
    }

    pub async fn view(&self) -> BoardView {
        BoardView::of(&*self.board.lock().await)
    }

    pub async fn apply_filter(&self, department: Option<&str>) -> Result<BoardView, BoardError> {
        let mut board = self.board.lock().await;
        board.apply_filter(department)?;
        Ok(BoardView::of(&board))
    }

    /// Out-of-range pages leave the board as it was.
    pub async fn go_to_page(&self, page: usize) -> BoardView {
        let mut board = self.board.lock().await;
        board.go_to_page(page);
        BoardView::of(&board)
    }

    pub async fn prev_page(&self) -> BoardView {
        let mut board = self.board.lock().await;
        board.prev_page();
        BoardView::of(&board)
    }

    pub async fn next_page(&self) -> BoardView {
        let mut board = self.board.lock().await;
        board.next_page();
        BoardView::of(&board)
    }
}

//! Axum route handlers for the Job Board API.
//!
//! Each mutating route returns the board as rendered after the action, so a
//! host page can redraw from a single response.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::board::{BoardHandle, BoardView, LoadOutcome};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    /// `null` selects "View all".
    pub department: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub outcome: LoadOutcome,
    pub board: BoardView,
}

fn board(state: &AppState) -> Result<&BoardHandle, AppError> {
    state
        .board
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Job board is not initialized".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/board
pub async fn handle_get_board(State(state): State<AppState>) -> Result<Json<BoardView>, AppError> {
    Ok(Json(board(&state)?.view().await))
}

/// POST /api/board/filter
pub async fn handle_apply_filter(
    State(state): State<AppState>,
    Json(req): Json<FilterRequest>,
) -> Result<Json<BoardView>, AppError> {
    let view = board(&state)?
        .apply_filter(req.department.as_deref())
        .await?;
    Ok(Json(view))
}

/// POST /api/board/page/:page
///
/// Pages outside `1..=total_pages` leave the board unchanged.
pub async fn handle_go_to_page(
    State(state): State<AppState>,
    Path(page): Path<usize>,
) -> Result<Json<BoardView>, AppError> {
    Ok(Json(board(&state)?.go_to_page(page).await))
}

/// POST /api/board/prev
pub async fn handle_prev_page(State(state): State<AppState>) -> Result<Json<BoardView>, AppError> {
    Ok(Json(board(&state)?.prev_page().await))
}

/// POST /api/board/next
pub async fn handle_next_page(State(state): State<AppState>) -> Result<Json<BoardView>, AppError> {
    Ok(Json(board(&state)?.next_page().await))
}

/// POST /api/board/refresh
///
/// A failed or stale load is reported in `outcome`; the board keeps what it
/// last rendered.
pub async fn handle_refresh(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let handle = board(&state)?;
    let outcome = handle.refresh().await;
    Ok(Json(RefreshResponse {
        outcome,
        board: handle.view().await,
    }))
}

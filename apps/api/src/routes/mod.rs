pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::board::handlers as board;
use crate::source::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job feed
        .route("/api/jobs", get(jobs::handle_list_jobs))
        .route("/api/jobs/reset-cache", get(jobs::handle_reset_cache))
        .route("/api/jobs/:id", get(jobs::handle_get_job))
        // Job board
        .route("/api/board", get(board::handle_get_board))
        .route("/api/board/filter", post(board::handle_apply_filter))
        .route("/api/board/page/:page", post(board::handle_go_to_page))
        .route("/api/board/prev", post(board::handle_prev_page))
        .route("/api/board/next", post(board::handle_next_page))
        .route("/api/board/refresh", post(board::handle_refresh))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::board::{BoardHandle, SlotName, SnapshotRenderer};
    use crate::config::{Config, JobSourceConfig};
    use crate::source::testing::{job, ScriptedJobSource};
    use crate::source::{CachedJobSource, JobSource, StaticJobSource};

    fn config() -> Config {
        Config {
            job_source: JobSourceConfig::File("jobs.json".into()),
            cache_ttl: Duration::from_secs(60),
            board_slots: SlotName::ALL.to_vec(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    async fn state_with(source: Arc<dyn JobSource>, slots: Vec<SlotName>) -> AppState {
        let jobs = Arc::new(CachedJobSource::new(source, Duration::from_secs(60)));
        let board = BoardHandle::init(SnapshotRenderer::new(slots), jobs.clone())
            .await
            .ok();
        AppState {
            config: config(),
            jobs,
            board,
        }
    }

    async fn app(count: u64) -> Router {
        let records = (1..=count)
            .map(|i| job(i, if i % 2 == 0 { "Ops" } else { "Flight" }, "2024-01-01"))
            .collect();
        let source = Arc::new(StaticJobSource::new(records));
        build_router(state_with(source, SlotName::ALL.to_vec()).await)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(1).await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_and_get_jobs() {
        let app = app(3).await;
        let (status, body) = send(&app, "GET", "/api/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["postingUrl"], "https://jobs.example.com/1");

        let (status, body) = send(&app, "GET", "/api/jobs/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["department"], "Ops");

        let (status, body) = send(&app, "GET", "/api/jobs/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Job 99 not found");
    }

    #[tokio::test]
    async fn test_reset_cache() {
        let app = app(1).await;
        let (status, body) = send(&app, "GET", "/api/jobs/reset-cache", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Jobs cache has been reset");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_job_feed_failure_is_bad_gateway() {
        let source = Arc::new(ScriptedJobSource::new(vec![]));
        let app = build_router(state_with(source, SlotName::ALL.to_vec()).await);
        let (status, body) = send(&app, "GET", "/api/jobs", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "JOB_SOURCE_ERROR");
    }

    #[tokio::test]
    async fn test_board_filter_and_paging() {
        let app = app(14).await;

        let (status, body) = send(&app, "GET", "/api/board", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_pages"], 3);
        assert_eq!(body["jobs"].as_array().unwrap().len(), 5);
        assert_eq!(body["filters"][0]["label"], "View all");

        let (_, body) = send(&app, "POST", "/api/board/page/3", None).await;
        assert_eq!(body["current_page"], 3);
        assert_eq!(body["jobs"].as_array().unwrap().len(), 4);
        assert_eq!(body["pagination"]["next_disabled"], true);

        let (_, body) = send(&app, "POST", "/api/board/page/4", None).await;
        assert_eq!(body["current_page"], 3);

        let (_, body) = send(&app, "POST", "/api/board/prev", None).await;
        assert_eq!(body["current_page"], 2);

        let (status, body) =
            send(&app, "POST", "/api/board/filter", Some(json!({ "department": "Ops" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_page"], 1);
        assert_eq!(body["filtered_jobs"], 7);
        assert!(body["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .all(|card| card["category"] == "Ops"));

        let (_, body) = send(&app, "POST", "/api/board/next", None).await;
        assert_eq!(body["current_page"], 2);
        assert_eq!(body["jobs"].as_array().unwrap().len(), 2);

        let (status, _) =
            send(&app, "POST", "/api/board/filter", Some(json!({ "department": "Sales" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) =
            send(&app, "POST", "/api/board/filter", Some(json!({ "department": null }))).await;
        assert_eq!(body["filter"], Value::Null);
        assert_eq!(body["filtered_jobs"], 14);
    }

    #[tokio::test]
    async fn test_board_refresh_reports_outcome() {
        let source = Arc::new(ScriptedJobSource::new(vec![Ok(vec![job(
            1,
            "Ops",
            "2024-01-01",
        )])]));
        let app = build_router(state_with(source, SlotName::ALL.to_vec()).await);

        let (status, body) = send(&app, "POST", "/api/board/refresh", None).await;
        assert_eq!(status, StatusCode::OK);
        // Served from cache, so the exhausted script is never reached.
        assert_eq!(body["outcome"], "applied");
        assert_eq!(body["board"]["total_jobs"], 1);

        send(&app, "GET", "/api/jobs/reset-cache", None).await;
        let (_, body) = send(&app, "POST", "/api/board/refresh", None).await;
        assert_eq!(body["outcome"], "failed");
        assert_eq!(body["board"]["total_jobs"], 1);
    }

    #[tokio::test]
    async fn test_board_unavailable_when_init_failed() {
        let source: Arc<dyn JobSource> = Arc::new(StaticJobSource::new(vec![]));
        let slots = SlotName::ALL
            .into_iter()
            .filter(|s| *s != SlotName::JobFiltersWrapper)
            .collect();
        let app = build_router(state_with(source, slots).await);

        let (status, body) = send(&app, "GET", "/api/board", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["message"], "Job board is not initialized");

        let (status, _) = send(&app, "GET", "/api/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}

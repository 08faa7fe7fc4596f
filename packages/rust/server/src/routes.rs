//! Route handlers.

use axum::Json;
use axum::extract::State;
use campaign_agents::AgentInfo;
use campaign_ingest::{FileSummary, SilentProgress};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::state::AppState;

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "Api is running" }))
}

/// GET /agent-info
pub async fn agent_info(State(state): State<AppState>) -> Json<AgentInfo> {
    Json(state.agent_info())
}

#[derive(Debug, Deserialize)]
pub struct FileReviewRequest {
    pub file_urls: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FileReviewResponse {
    pub text: String,
    pub files: Vec<FileSummary>,
}

/// POST /tools/file-review
///
/// Per-file failures are part of `text`; only a malformed body is rejected.
pub async fn file_review(
    State(state): State<AppState>,
    Json(request): Json<FileReviewRequest>,
) -> Json<FileReviewResponse> {
    tracing::info!(files = request.file_urls.len(), "file review requested");
    let report = state.ingest().ingest(&request.file_urls, &SilentProgress).await;
    Json(FileReviewResponse {
        text: report.render(),
        files: report.summaries(),
    })
}

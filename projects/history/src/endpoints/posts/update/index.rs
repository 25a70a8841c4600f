use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::{
    endpoints::SyncResponse,
    state::AppState,
    sync::walker::sync_latest,
};

/// Axum handler: GET /update
pub async fn handler(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let report = sync_latest(&state.client, &state.pool, &state.feed_url).await;
    info!(pages = report.pages, inserted = report.inserted, failed = report.failure.is_some(), "incremental sync finished");

    (StatusCode::OK, Json(SyncResponse::from(report.summary())))
}

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::{
    endpoints::SyncResponse,
    state::AppState,
    sync::walker::sync_all,
};

/// Axum handler: GET /all
///
/// Walks the whole feed, newest page first, down to the last page.
pub async fn handler(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let report = sync_all(&state.client, &state.pool, &state.feed_url).await;
    info!(pages = report.pages, inserted = report.inserted, failed = report.failure.is_some(), "full sync finished");

    (StatusCode::OK, Json(SyncResponse::from(report.summary())))
}

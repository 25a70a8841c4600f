use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use chrono::Local;
use thiserror::Error;
use tracing::error;

use crate::{
    history::{load_history, LoadHistoryError},
    render::render_history_page,
    state::AppState,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error("LoadHistory: {source}")]
    LoadHistory {
        #[from]
        source: LoadHistoryError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        error!(error = %self, "history page failed");
        match self {
            HandlerError::GetConnectionFromPool { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable").into_response(),
            HandlerError::LoadHistory { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Could not load posts").into_response(),
        }
    }
}

/// Axum handler: GET /index
///
/// Posts from today's month and day (server local time) across all years.
pub async fn handler(Extension(state): Extension<AppState>) -> Result<Html<String>, HandlerError> {
    let today = Local::now().date_naive();

    let mut conn = state.pool.get()?;
    let entries = load_history(&mut conn, today)?;

    Ok(Html(render_history_page(today, &entries)))
}

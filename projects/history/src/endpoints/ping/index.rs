use axum::{extract::Json, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
pub struct PingResponse {
    message: &'static str,
}

/// Axum handler: GET /ping
pub async fn handler() -> impl IntoResponse {
    Json(PingResponse { message: "pong" })
}

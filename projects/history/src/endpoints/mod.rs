pub mod ping {
    pub mod index;
}

pub mod posts {
    pub mod all {
        pub mod index;
    }
    pub mod update {
        pub mod index;
    }
}

pub mod history {
    pub mod read_today {
        pub mod index;
    }
}

use axum::{routing::get, Extension, Router};
use serde::Serialize;

use crate::{state::AppState, sync::walker::SyncSummary};

/// Body of the sync routes. Error detail stays in the server log.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub result: String,
}

impl From<SyncSummary> for SyncResponse {
    fn from(summary: SyncSummary) -> Self {
        SyncResponse {
            result: summary.to_string(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping::index::handler))
        .route("/all", get(posts::all::index::handler))
        .route("/update", get(posts::update::index::handler))
        .route("/index", get(history::read_today::index::handler))
        .layer(Extension(state))
}

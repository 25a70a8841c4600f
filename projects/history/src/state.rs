use std::sync::Arc;

use reqwest::{Client, Url};

use crate::db::PgPool;

/// Shared by every handler through an axum `Extension`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub client: Client,
    /// First feed page, access token included.
    pub feed_url: Arc<str>,
}

impl AppState {
    pub fn new(pool: PgPool, client: Client, feed_url: Url) -> Self {
        AppState {
            pool,
            client,
            feed_url: Arc::from(String::from(feed_url)),
        }
    }
}

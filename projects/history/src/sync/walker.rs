use std::fmt;

use interfaces_instagram_media::index::{fetch_media_page, FetchMediaPageError};
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info};

use crate::sync::ingest::{ingest_page, CheckoutStoreError, IngestError, PageStop, StorePool};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("FetchMediaPage: {source}")]
    FetchMediaPage {
        #[from]
        source: FetchMediaPageError,
    },

    #[error("CheckoutStore: {source}")]
    CheckoutStore {
        #[from]
        source: CheckoutStoreError,
    },

    #[error("Ingest: {source}")]
    Ingest {
        #[from]
        source: IngestError,
    },
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub pages: usize,
    /// Total across all pages, including pages before a failure.
    pub inserted: usize,
    pub failure: Option<SyncError>,
}

/// What the HTTP caller gets to see of a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncSummary {
    Failed,
    NoNewPosts,
    Inserted(usize),
}

impl SyncReport {
    pub fn summary(&self) -> SyncSummary {
        match (&self.failure, self.inserted) {
            (Some(_), _) => SyncSummary::Failed,
            (None, 0) => SyncSummary::NoNewPosts,
            (None, n) => SyncSummary::Inserted(n),
        }
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncSummary::Failed => write!(f, "error occurred"),
            SyncSummary::NoNewPosts => write!(f, "no new posts"),
            SyncSummary::Inserted(n) => write!(f, "{n} posts inserted."),
        }
    }
}

/// Ingests only the newest page. Usually enough thanks to the early stop.
pub async fn sync_latest<P>(client: &Client, pool: &P, first_url: &str) -> SyncReport
where
    P: StorePool,
{
    walk(client, pool, first_url, false).await
}

/// Ingests every page of the feed, newest first, until the last page or a
/// failure. A stored post ends only the page it is on, so an interrupted
/// backfill picks up the older pages on the next run.
pub async fn sync_all<P>(client: &Client, pool: &P, first_url: &str) -> SyncReport
where
    P: StorePool,
{
    walk(client, pool, first_url, true).await
}

/// A store is checked out per page and released before the next fetch.
async fn walk<P>(client: &Client, pool: &P, first_url: &str, follow_next: bool) -> SyncReport
where
    P: StorePool,
{
    let mut report = SyncReport::default();
    let mut url = first_url.to_string();

    loop {
        let page = match fetch_media_page(client, &url).await {
            Ok(page) => page,
            Err(source) => {
                error!(error = %source, page = report.pages + 1, "media page fetch failed");
                report.failure = Some(source.into());
                return report;
            }
        };
        report.pages += 1;

        let ingest = match pool.with_store(|store| ingest_page(store, &page)) {
            Ok(ingest) => ingest,
            Err(source) => {
                error!(error = %source, page = report.pages, "no store for media page");
                report.failure = Some(source.into());
                return report;
            }
        };
        report.inserted += ingest.inserted;
        info!(page = report.pages, inserted = ingest.inserted, total = report.inserted, "ingested media page");

        match ingest.stop {
            PageStop::Exhausted | PageStop::KnownPost { .. } => {}
            PageStop::Failed(source) => {
                error!(error = %source, page = report.pages, "media page ingestion failed");
                report.failure = Some(source.into());
                return report;
            }
        }

        match page.next_page() {
            Some(next) if follow_next => url = next.to_string(),
            _ => return report,
        }
    }
}

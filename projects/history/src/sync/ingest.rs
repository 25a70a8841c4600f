use chrono::{Datelike, NaiveDateTime};
use diesel::PgConnection;
use interfaces_instagram_media::index::MediaPage;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::db::{
    post::{
        models::NewPost,
        queries::{find_post_by_timestamp, insert_post, FindPostByTimestampError, InsertPostError},
    },
    PgPool,
};

/// Only UTC timestamps are accepted, the feed never sends another offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+0000";

/// What the ingestor needs from the store.
pub trait PostStore {
    fn post_exists(&mut self, timestamp: &str) -> Result<bool, FindPostByTimestampError>;

    fn insert_post(&mut self, new: &NewPost) -> Result<(), InsertPostError>;
}

impl PostStore for PgConnection {
    fn post_exists(&mut self, timestamp: &str) -> Result<bool, FindPostByTimestampError> {
        find_post_by_timestamp(self, timestamp).map(|post| post.is_some())
    }

    fn insert_post(&mut self, new: &NewPost) -> Result<(), InsertPostError> {
        insert_post(self, new).map(|_| ())
    }
}

#[derive(Debug, Error)]
pub enum CheckoutStoreError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
}

/// Hands out a store for the duration of one closure call.
pub trait StorePool {
    fn with_store<T>(
        &self,
        f: impl FnOnce(&mut dyn PostStore) -> T,
    ) -> Result<T, CheckoutStoreError>;
}

impl StorePool for PgPool {
    fn with_store<T>(
        &self,
        f: impl FnOnce(&mut dyn PostStore) -> T,
    ) -> Result<T, CheckoutStoreError> {
        let mut conn = self.get()?;
        Ok(f(&mut *conn))
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("ParseTimestamp: {timestamp}: {source}")]
    ParseTimestamp {
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    FindPost {
        #[from]
        source: FindPostByTimestampError,
    },

    #[error(transparent)]
    InsertPost {
        #[from]
        source: InsertPostError,
    },
}

/// Why ingestion of a page ended.
#[derive(Debug)]
pub enum PageStop {
    /// Every post on the page was new.
    Exhausted,
    /// Hit a stored post; the rest of the page is assumed stored too.
    KnownPost { timestamp: String },
    Failed(IngestError),
}

#[derive(Debug)]
pub struct PageIngest {
    /// Posts written before the page stopped. They stay committed on failure.
    pub inserted: usize,
    pub stop: PageStop,
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}

/// Stores the posts of `page` in feed order until the first known post.
///
/// The feed is expected newest-first. A page that is not gets a warning
/// only; the early stop still applies.
pub fn ingest_page<S>(store: &mut S, page: &MediaPage) -> PageIngest
where
    S: PostStore + ?Sized,
{
    let mut inserted = 0;
    let mut previous: Option<NaiveDateTime> = None;
    let mut order_warned = false;

    for post in &page.data {
        let published = match parse_timestamp(&post.timestamp) {
            Ok(published) => published,
            Err(source) => {
                return PageIngest {
                    inserted,
                    stop: PageStop::Failed(IngestError::ParseTimestamp {
                        timestamp: post.timestamp.clone(),
                        source,
                    }),
                }
            }
        };

        if !order_warned && previous.is_some_and(|prev| published > prev) {
            warn!(timestamp = %post.timestamp, "media page is not newest-first, early stop may skip posts");
            order_warned = true;
        }
        previous = Some(published);

        match store.post_exists(&post.timestamp) {
            Ok(true) => {
                debug!(timestamp = %post.timestamp, inserted, "reached a stored post");
                return PageIngest {
                    inserted,
                    stop: PageStop::KnownPost {
                        timestamp: post.timestamp.clone(),
                    },
                };
            }
            Ok(false) => {}
            Err(source) => {
                return PageIngest {
                    inserted,
                    stop: PageStop::Failed(source.into()),
                }
            }
        }

        let new = NewPost {
            id: Uuid::new_v4(),
            post_at: &post.timestamp,
            url: &post.media_url,
            caption: &post.caption,
            year: published.year(),
            month: published.month() as i32,
            day: published.day() as i32,
        };

        if let Err(source) = store.insert_post(&new) {
            return PageIngest {
                inserted,
                stop: PageStop::Failed(source.into()),
            };
        }

        inserted += 1;
    }

    PageIngest {
        inserted,
        stop: PageStop::Exhausted,
    }
}

use chrono::{Datelike, NaiveDate};
use diesel::PgConnection;
use thiserror::Error;

use crate::db::post::queries::{get_posts_by_month_day, GetPostsByMonthDayError};

/// Videos are served from the feed's `video` CDN hosts.
pub const VIDEO_URL_MARKER: &str = "https://video";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMedia {
    Image(String),
    Video(String),
}

impl HistoryMedia {
    pub fn from_url(url: String) -> Self {
        if url.contains(VIDEO_URL_MARKER) {
            HistoryMedia::Video(url)
        } else {
            HistoryMedia::Image(url)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub year: i32,
    pub media: HistoryMedia,
}

impl HistoryEntry {
    pub fn new(url: String, year: i32) -> Self {
        HistoryEntry {
            year,
            media: HistoryMedia::from_url(url),
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match &self.media {
            HistoryMedia::Image(url) => Some(url.as_str()),
            HistoryMedia::Video(_) => None,
        }
    }

    pub fn video_url(&self) -> Option<&str> {
        match &self.media {
            HistoryMedia::Video(url) => Some(url.as_str()),
            HistoryMedia::Image(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadHistoryError {
    #[error("GetPostsByMonthDay: {source}")]
    GetPostsByMonthDay {
        #[from]
        source: GetPostsByMonthDayError,
    },
}

/// Posts published on the month/day of `date` in any year, newest year first.
pub fn load_history(
    conn: &mut PgConnection,
    date: NaiveDate,
) -> Result<Vec<HistoryEntry>, LoadHistoryError> {
    let rows = get_posts_by_month_day(conn, date.month() as i32, date.day() as i32)?;

    Ok(rows
        .into_iter()
        .map(|(url, year)| HistoryEntry::new(url, year))
        .collect())
}

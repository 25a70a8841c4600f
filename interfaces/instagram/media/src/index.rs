use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://graph.instagram.com";

const MEDIA_FIELDS: &str = "media_url,caption,timestamp";

/// One post as returned by the feed. `timestamp` is kept verbatim, it is the
/// dedup key on our side. A missing one decodes as empty and is rejected when
/// the post is parsed, not when the page is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaPost {
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Cursors {
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub after: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub cursors: Cursors,
    #[serde(default)]
    pub next: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaPage {
    pub data: Vec<MediaPost>,
    #[serde(default)]
    pub paging: Paging,
}

impl MediaPage {
    /// URL of the next (older) page, `None` on the last page.
    pub fn next_page(&self) -> Option<&str> {
        let next = self.paging.next.trim();
        (!next.is_empty()).then_some(next)
    }
}

#[derive(Debug, Error)]
pub enum BuildMediaFeedUrlError {
    #[error("ParseBaseUrl: {source}")]
    ParseBaseUrl {
        #[from]
        source: url::ParseError,
    },
}

/// First page of the authenticated user's media feed.
pub fn media_feed_url(base_url: &str, token: &str) -> Result<Url, BuildMediaFeedUrlError> {
    let mut url = Url::parse(&format!("{}/me/media", base_url.trim_end_matches('/')))?;
    url.query_pairs_mut()
        .append_pair("fields", MEDIA_FIELDS)
        .append_pair("access_token", token);
    Ok(url)
}

/// Single GET of `url` (first page or a `paging.next` link), decoded.
pub async fn fetch_media_page(
    client: &Client,
    url: &str,
) -> Result<MediaPage, FetchMediaPageError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|source| FetchMediaPageError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchMediaPageError::ResponseRead { source })?;

    if !status.is_success() {
        return Err(FetchMediaPageError::UnexpectedStatus { status, body });
    }

    let page: MediaPage = serde_json::from_str(&body)
        .map_err(|source| FetchMediaPageError::DeserializeResponseBody { source })?;

    debug!(posts = page.data.len(), has_next = page.next_page().is_some(), "fetched media page");

    Ok(page)
}

#[derive(Debug, Error)]
pub enum FetchMediaPageError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("UnexpectedStatus: {status}")]
    UnexpectedStatus {
        status: StatusCode,
        body: String,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const PAGE: &str = r#"{
        "data": [
            {
                "media_url": "https://scontent.cdninstagram.com/a.jpg",
                "caption": "sunset",
                "timestamp": "2021-03-15T09:30:00+0000",
                "id": "17890"
            },
            {
                "media_url": "https://video.cdninstagram.com/b.mp4",
                "timestamp": "2020-03-15T08:00:00+0000",
                "id": "17889"
            }
        ],
        "paging": {
            "cursors": { "before": "QVFI", "after": "QVFJ" },
            "next": "https://graph.instagram.com/v1/me/media?after=QVFJ"
        }
    }"#;

    #[test]
    fn builds_feed_url_with_encoded_token() {
        let url = media_feed_url("https://graph.instagram.com/", "a b&c").unwrap();

        assert_eq!(url.path(), "/me/media");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("fields".to_string(), MEDIA_FIELDS.to_string()),
                ("access_token".to_string(), "a b&c".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            media_feed_url("not a url", "token"),
            Err(BuildMediaFeedUrlError::ParseBaseUrl { .. })
        ));
    }

    #[test]
    fn missing_paging_means_last_page() {
        let page: MediaPage = serde_json::from_str(r#"{"data": []}"#).unwrap();

        assert_eq!(page.next_page(), None);
    }

    #[test]
    fn post_without_timestamp_still_decodes() {
        let page: MediaPage =
            serde_json::from_str(r#"{"data": [{"media_url": "https://a/1.jpg", "id": "1"}]}"#).unwrap();

        assert_eq!(page.data[0].timestamp, "");
        assert_eq!(page.data[0].media_url, "https://a/1.jpg");
    }

    #[tokio::test]
    async fn fetches_and_decodes_page() {
        let mut server = Server::new_async().await;
        let url = media_feed_url(&server.url(), "secret").unwrap();

        let mock = server
            .mock("GET", "/me/media")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("fields".into(), MEDIA_FIELDS.into()),
                Matcher::UrlEncoded("access_token".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAGE)
            .create_async()
            .await;

        let page = fetch_media_page(&Client::new(), url.as_str()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].caption, "sunset");
        assert_eq!(page.data[1].caption, "");
        assert_eq!(page.data[1].timestamp, "2020-03-15T08:00:00+0000");
        assert_eq!(page.paging.cursors.after, "QVFJ");
        assert_eq!(
            page.next_page(),
            Some("https://graph.instagram.com/v1/me/media?after=QVFJ")
        );
    }

    #[tokio::test]
    async fn reports_malformed_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/me/media")
            .with_status(200)
            .with_body("{\"data\": [")
            .create_async()
            .await;

        let result = fetch_media_page(&Client::new(), &format!("{}/me/media", server.url())).await;

        assert!(matches!(
            result,
            Err(FetchMediaPageError::DeserializeResponseBody { .. })
        ));
    }

    #[tokio::test]
    async fn reports_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/me/media")
            .with_status(400)
            .with_body(r#"{"error":{"message":"Invalid OAuth access token","code":190}}"#)
            .create_async()
            .await;

        let result = fetch_media_page(&Client::new(), &format!("{}/me/media", server.url())).await;

        match result {
            Err(FetchMediaPageError::UnexpectedStatus { status, body }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("Invalid OAuth access token"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn reports_transport_failure() {
        let result = fetch_media_page(&Client::new(), "http://127.0.0.1:1/me/media").await;

        assert!(matches!(result, Err(FetchMediaPageError::RequestSend { .. })));
    }
}

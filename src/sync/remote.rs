//! Remote quote feed
//!
//! Fetches a posts-shaped JSON list over HTTP and maps it into quotes.

use crate::sync::SyncError;
use crate::types::Quote;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Category assigned to records coming from the remote feed
pub const REMOTE_CATEGORY: &str = "Server";

/// Source of remote quotes - the sync service works against this
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Quote>, SyncError>;
}

/// A posts-shaped record as returned by the remote endpoint
#[derive(Debug, Deserialize)]
struct RemotePost {
    #[serde(default)]
    title: Option<String>,
}

/// HTTP implementation of [`QuoteSource`]
pub struct HttpQuoteSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Map posts into quotes: `title` becomes the text, the category is
    /// synthetic. Records without a usable title are dropped.
    fn map_posts(posts: Vec<RemotePost>) -> Vec<Quote> {
        posts
            .into_iter()
            .filter_map(|post| post.title)
            .map(|title| Quote::new(title, REMOTE_CATEGORY))
            .filter(Quote::is_well_formed)
            .collect()
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch(&self) -> Result<Vec<Quote>, SyncError> {
        tracing::debug!("Fetching remote quotes from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(SyncError::Status(response.status()));
        }

        let posts: Vec<RemotePost> = response.json().await?;
        let quotes = Self::map_posts(posts);
        tracing::debug!("Fetched {} usable remote quotes", quotes.len());
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_posts_transform() {
        let posts: Vec<RemotePost> = serde_json::from_str(
            r#"[
                {"userId": 1, "id": 1, "title": "First post", "body": "..."},
                {"userId": 1, "id": 2, "title": "Second post", "body": "..."}
            ]"#,
        )
        .unwrap();

        let quotes = HttpQuoteSource::map_posts(posts);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "First post");
        assert_eq!(quotes[0].category, REMOTE_CATEGORY);
    }

    #[test]
    fn test_map_posts_drops_malformed() {
        let posts: Vec<RemotePost> = serde_json::from_str(
            r#"[
                {"id": 1},
                {"id": 2, "title": "   "},
                {"id": 3, "title": "Usable"}
            ]"#,
        )
        .unwrap();

        let quotes = HttpQuoteSource::map_posts(posts);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].text, "Usable");
    }
}

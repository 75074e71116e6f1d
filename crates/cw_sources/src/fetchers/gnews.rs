use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cw_core::{Candidate, Error, NewsFetcher, Provider, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::keywords::{is_entertainment, SEARCH_QUERY};

const ENDPOINT: &str = "https://gnews.io/api/v4/search";

#[derive(Deserialize)]
struct SearchResponse {
    articles: Vec<WireArticle>,
}

#[derive(Deserialize)]
struct WireArticle {
    title: Option<String>,
    description: Option<String>,
    url: String,
    image: Option<String>,
    #[serde(rename = "publishedAt", default)]
    published_at: Option<DateTime<Utc>>,
    source: WireSource,
}

#[derive(Deserialize)]
struct WireSource {
    name: Option<String>,
}

/// GNews `/api/v4/search` client, same contract as the NewsAPI fetcher.
pub struct GnewsFetcher {
    client: Client,
    api_key: Option<String>,
}

impl GnewsFetcher {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: super::http_client(),
            api_key,
        }
    }
}

#[async_trait]
impl NewsFetcher for GnewsFetcher {
    fn provider(&self) -> Provider {
        Provider::Gnews
    }

    async fn fetch(&self, count: usize) -> Result<Vec<Candidate>> {
        let Some(api_key) = &self.api_key else {
            warn!("GNEWS_API_KEY not configured, skipping GNews source");
            return Ok(Vec::new());
        };

        let max = super::page_size(count).min(25).to_string();
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("q", SEARCH_QUERY),
                ("lang", "en"),
                ("sortby", "publishedAt"),
                ("max", max.as_str()),
                ("apikey", api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "GNews returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title?;
                let description = article.description.unwrap_or_default();
                if !is_entertainment(&title, &description) {
                    return None;
                }
                Some(Candidate {
                    title,
                    description,
                    url: article.url,
                    image_url: article.image,
                    source_name: article.source.name.unwrap_or_else(|| "GNews".to_string()),
                    published_at: article.published_at,
                    provider: Provider::Gnews,
                })
            })
            .take(count)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_yields_empty_list() {
        let fetcher = GnewsFetcher::new(None);
        let candidates = fetcher.fetch(10).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn response_shape_parses() {
        let raw = r#"{
            "totalArticles": 1,
            "articles": [{
                "title": "Streaming giant orders new season",
                "description": "Another season is coming.",
                "content": "...",
                "url": "https://example.com/b",
                "image": "https://example.com/b.jpg",
                "publishedAt": "2025-06-01T11:00:00Z",
                "source": {"name": "Example Daily", "url": "https://example.com"}
            }]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(
            parsed.articles[0].source.name.as_deref(),
            Some("Example Daily")
        );
    }
}

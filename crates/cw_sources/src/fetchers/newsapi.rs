use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cw_core::{Candidate, Error, NewsFetcher, Provider, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::keywords::{is_entertainment, SEARCH_QUERY};

const ENDPOINT: &str = "https://newsapi.org/v2/everything";

#[derive(Deserialize)]
struct SearchResponse {
    articles: Vec<WireArticle>,
}

#[derive(Deserialize)]
struct WireArticle {
    title: Option<String>,
    description: Option<String>,
    url: String,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt", default)]
    published_at: Option<DateTime<Utc>>,
    source: WireSource,
}

#[derive(Deserialize)]
struct WireSource {
    name: Option<String>,
}

/// NewsAPI.org `/v2/everything` client. A missing key disables the fetcher
/// rather than failing the batch.
pub struct NewsApiFetcher {
    client: Client,
    api_key: Option<String>,
}

impl NewsApiFetcher {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: super::http_client(),
            api_key,
        }
    }
}

#[async_trait]
impl NewsFetcher for NewsApiFetcher {
    fn provider(&self) -> Provider {
        Provider::NewsApi
    }

    async fn fetch(&self, count: usize) -> Result<Vec<Candidate>> {
        let Some(api_key) = &self.api_key else {
            warn!("NEWSAPI_KEY not configured, skipping NewsAPI source");
            return Ok(Vec::new());
        };

        let page_size = super::page_size(count).to_string();
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("q", SEARCH_QUERY),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ])
            .header("X-Api-Key", api_key.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "NewsAPI returned {}",
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
                    image_url: article.url_to_image,
                    source_name: article
                        .source
                        .name
                        .unwrap_or_else(|| "NewsAPI".to_string()),
                    published_at: article.published_at,
                    provider: Provider::NewsApi,
                })
            })
            .take(count)
            .collect())
    }
}

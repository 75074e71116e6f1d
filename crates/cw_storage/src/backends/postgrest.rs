use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use cw_core::{ArticleStore, Error, NewsArticle, RecentEntry, Result};
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_TABLE: &str = "news_articles";

#[derive(Clone)]
pub struct PostgrestConfig {
    pub base_url: String,
    pub service_key: String,
    pub table: String,
}

impl PostgrestConfig {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            base_url,
            service_key,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl fmt::Debug for PostgrestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}

#[derive(Deserialize)]
struct RecentRow {
    source_url: String,
    title: String,
}

/// Article store over a PostgREST endpoint (a managed Postgres such as
/// Supabase). Only the two operations the pipeline needs: recent-history
/// select and single-row insert.
pub struct PostgrestStore {
    client: Client,
    config: PostgrestConfig,
}

impl PostgrestStore {
    pub fn new(config: PostgrestConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.config.service_key.as_str())
            .bearer_auth(&self.config.service_key)
    }
}

#[async_trait]
impl ArticleStore for PostgrestStore {
    async fn insert_article(&self, article: &NewsArticle) -> Result<()> {
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=minimal")
            .json(article)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Storage(format!(
                "insert returned {}: {}",
                status, body
            )));
        }
        Ok(())
    }

    async fn recent_entries(&self, limit: usize) -> Result<Vec<RecentEntry>> {
        let limit = limit.to_string();
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[
                ("select", "source_url,title"),
                ("order", "published_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "history select returned {}",
                response.status()
            )));
        }

        let rows: Vec<RecentRow> = response.json().await?;
        Ok(rows
            .into_iter()
            .map(|row| RecentEntry {
                url: row.source_url,
                title: row.title,
            })
            .collect())
    }

    async fn recent_articles(&self, limit: usize) -> Result<Vec<NewsArticle>> {
        let limit = limit.to_string();
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[
                ("select", "*"),
                ("order", "published_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "article select returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_normalizes_trailing_slash() {
        let store = PostgrestStore::new(PostgrestConfig::new(
            "https://proj.supabase.co/".to_string(),
            "key".to_string(),
        ));
        assert_eq!(
            store.table_url(),
            "https://proj.supabase.co/rest/v1/news_articles"
        );
    }

    #[test]
    fn debug_redacts_service_key() {
        let config = PostgrestConfig::new("https://proj.supabase.co".to_string(), "svc".to_string());
        assert!(!format!("{:?}", config).contains("svc"));
    }
}

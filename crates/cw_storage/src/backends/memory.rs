use async_trait::async_trait;
use cw_core::{ArticleStore, Error, NewsArticle, RecentEntry, Result};
use tokio::sync::RwLock;

/// Append-only in-memory store, used by tests and credential-less local
/// runs. Insertion order doubles as publication order.
#[derive(Default)]
pub struct MemoryStore {
    articles: RwLock<Vec<NewsArticle>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn insert_article(&self, article: &NewsArticle) -> Result<()> {
        let mut articles = self.articles.write().await;
        if articles.iter().any(|a| a.source_url == article.source_url) {
            return Err(Error::Storage(format!(
                "article with source_url {} already exists",
                article.source_url
            )));
        }
        articles.push(article.clone());
        Ok(())
    }

    async fn recent_entries(&self, limit: usize) -> Result<Vec<RecentEntry>> {
        let articles = self.articles.read().await;
        Ok(articles
            .iter()
            .rev()
            .take(limit)
            .map(|a| RecentEntry {
                url: a.source_url.clone(),
                title: a.title.clone(),
            })
            .collect())
    }

    async fn recent_articles(&self, limit: usize) -> Result<Vec<NewsArticle>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().rev().take(limit).cloned().collect())
    }
}

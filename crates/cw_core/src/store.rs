use async_trait::async_trait;

use crate::types::{NewsArticle, RecentEntry};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert one article row. The store rejects a second article with the
    /// same `source_url`.
    async fn insert_article(&self, article: &NewsArticle) -> Result<()>;

    /// The `(url, title)` pairs of the most recently published articles,
    /// newest first, used as the dedup oracle for a batch.
    async fn recent_entries(&self, limit: usize) -> Result<Vec<RecentEntry>>;

    /// The most recently published articles, newest first.
    async fn recent_articles(&self, limit: usize) -> Result<Vec<NewsArticle>>;
}

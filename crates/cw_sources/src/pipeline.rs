use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use cw_core::{ArticleStore, Candidate, NewsArticle, NewsFetcher, Provider, Result};
use cw_rewrite::Rewriter;
use cw_storage::compose_article;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::dedup::{select_unique, DedupConfig};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How many of the most recent persisted articles feed the dedup
    /// oracle. Older duplicates beyond this window are not caught.
    pub history_window: usize,
    pub dedup: DedupConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_window: 100,
            dedup: DedupConfig::default(),
        }
    }
}

/// What one batch produced: the persisted articles plus how many raw
/// candidates each source contributed.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub articles: Vec<NewsArticle>,
    pub sources: BTreeMap<String, usize>,
}

/// The ingestion batch: fan out to both sources, dedup against the batch
/// and the recent history, then rewrite and persist each survivor in
/// sequence. A failed source, a stubborn model, or a failed insert degrades
/// that piece; it never aborts the batch.
pub struct NewsPipeline {
    fetchers: Vec<Arc<dyn NewsFetcher>>,
    rewriter: Rewriter,
    store: Arc<dyn ArticleStore>,
    config: PipelineConfig,
}

impl NewsPipeline {
    pub fn new(
        fetchers: Vec<Arc<dyn NewsFetcher>>,
        rewriter: Rewriter,
        store: Arc<dyn ArticleStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            fetchers,
            rewriter,
            store,
            config,
        }
    }

    pub async fn run(&self, requested: usize) -> Result<BatchReport> {
        info!(
            "📰 Fetching up to {} articles from {} sources",
            requested,
            self.fetchers.len()
        );

        let fetched: Vec<(Provider, Vec<Candidate>)> =
            join_all(self.fetchers.iter().map(|fetcher| async move {
                let provider = fetcher.provider();
                match fetcher.fetch(requested).await {
                    Ok(items) => (provider, items),
                    Err(e) => {
                        warn!(
                            provider = provider.tag(),
                            error = %e,
                            "source unavailable, continuing without it"
                        );
                        (provider, Vec::new())
                    }
                }
            }))
            .await;

        let mut sources = BTreeMap::new();
        let mut candidates = Vec::new();
        for (provider, items) in fetched {
            sources.insert(provider.tag().to_string(), items.len());
            candidates.extend(items);
        }

        let history = match self.store.recent_entries(self.config.history_window).await {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "could not load recent history, deduplicating within batch only");
                Vec::new()
            }
        };

        let selected = select_unique(candidates, &history, requested, &self.config.dedup);
        info!("🧹 {} candidates left after dedup", selected.len());

        let mut articles = Vec::new();
        for candidate in selected {
            let draft = self
                .rewriter
                .rewrite(&candidate.title, &candidate.description)
                .await;
            let article = compose_article(draft, &candidate, Utc::now());
            match self.store.insert_article(&article).await {
                Ok(()) => {
                    info!("💾 Published {}", article.slug);
                    articles.push(article);
                }
                Err(e) => {
                    warn!(slug = %article.slug, error = %e, "insert failed, skipping item");
                }
            }
        }

        info!("✅ Batch complete: {} articles published", articles.len());
        Ok(BatchReport { articles, sources })
    }
}

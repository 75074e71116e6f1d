use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which upstream search API produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    NewsApi,
    Gnews,
}

impl Provider {
    pub fn tag(&self) -> &'static str {
        match self {
            Provider::NewsApi => "newsapi",
            Provider::Gnews => "gnews",
        }
    }
}

/// A headline pulled from one of the search APIs. Lives only for the
/// duration of a batch; never persisted itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub source_name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub provider: Provider,
}

/// Title/content pair produced by the rewriter (or its pass-through
/// fallback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenDraft {
    pub title: String,
    pub content: String,
}

/// A persisted article row. `content` is paragraph-tagged HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub source_name: String,
    pub source_url: String,
    pub status: String,
    pub ai_generated: bool,
    pub published_at: DateTime<Utc>,
}

/// One row of the recent-history index the deduplicator checks against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentEntry {
    pub url: String,
    pub title: String,
}

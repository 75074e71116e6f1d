use async_trait::async_trait;

use crate::types::{Candidate, Provider};
use crate::Result;

#[async_trait]
pub trait NewsFetcher: Send + Sync {
    fn provider(&self) -> Provider;

    /// Query the upstream search API and return at most `count` candidates
    /// that pass the entertainment keyword filter. A fetcher with no
    /// configured credential returns an empty list rather than an error.
    async fn fetch(&self, count: usize) -> Result<Vec<Candidate>>;
}

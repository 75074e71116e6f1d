use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait CompletionModel: Send + Sync {
    fn name(&self) -> &str;

    /// Run one chat completion with a system and a user message, returning
    /// the raw assistant text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

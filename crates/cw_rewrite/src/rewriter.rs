use std::sync::Arc;
use std::time::Duration;

use cw_core::{CompletionModel, RewrittenDraft};
use tracing::{debug, warn};

use crate::extract::ExtractionStrategy;
use crate::limiter::RewriteLimiter;

const SYSTEM_PROMPT: &str = "You are an entertainment journalist for a movie and TV \
discovery site. Rewrite the story you are given as an original article of 800-1200 \
words across 8-10 paragraphs. Wrap every paragraph in <p></p> tags. Respond with a \
single JSON object of the form {\"title\": \"...\", \"content\": \"...\"} and nothing \
else. The title must be catchy but factual; the content must not copy the source \
wording.";

#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Completion attempts before giving up on an item.
    pub max_attempts: u32,
    /// Extracted content shorter than this is treated as a failed parse.
    pub min_content_len: usize,
    /// Minimum spacing between completion calls. Zero disables limiting.
    pub call_interval: Duration,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_content_len: 500,
            call_interval: Duration::from_secs(20),
        }
    }
}

/// Turns a source headline + summary into a full article. Never fails: when
/// the model is unavailable or every attempt parses to nothing, the original
/// text passes through unchanged.
pub struct Rewriter {
    model: Option<Arc<dyn CompletionModel>>,
    ladder: Vec<ExtractionStrategy>,
    limiter: RewriteLimiter,
    config: RewriteConfig,
}

impl Rewriter {
    pub fn new(model: Option<Arc<dyn CompletionModel>>, config: RewriteConfig) -> Self {
        Self {
            model,
            ladder: ExtractionStrategy::ladder(),
            limiter: RewriteLimiter::new(config.call_interval),
            config,
        }
    }

    pub fn passthrough() -> Self {
        Self::new(None, RewriteConfig::default())
    }

    pub async fn rewrite(&self, title: &str, description: &str) -> RewrittenDraft {
        let Some(model) = &self.model else {
            debug!("no completion model configured, passing source text through");
            return fallback(title, description);
        };

        for attempt in 1..=self.config.max_attempts {
            self.limiter.acquire().await;
            let raw = match model.complete(SYSTEM_PROMPT, &user_prompt(title, description)).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(attempt, error = %e, "completion call failed");
                    continue;
                }
            };

            for strategy in &self.ladder {
                if let Some(draft) =
                    strategy.try_extract(&raw, title, self.config.min_content_len)
                {
                    debug!(attempt, strategy = ?strategy, "rewrite extracted");
                    return draft;
                }
            }
            warn!(attempt, "no extraction strategy produced usable content");
        }

        warn!(title, "rewrite attempts exhausted, falling back to source text");
        fallback(title, description)
    }
}

fn fallback(title: &str, description: &str) -> RewrittenDraft {
    RewrittenDraft {
        title: title.to_string(),
        content: description.to_string(),
    }
}

fn user_prompt(title: &str, description: &str) -> String {
    format!("Headline: {}\n\nSource summary: {}", title, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cw_core::{Error, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedModel {
        responses: Vec<Result<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(i) {
                Some(Ok(s)) => Ok(s.clone()),
                Some(Err(_)) => Err(Error::Rewrite("scripted failure".to_string())),
                None => Err(Error::Rewrite("out of scripted responses".to_string())),
            }
        }
    }

    fn quick_config() -> RewriteConfig {
        RewriteConfig {
            call_interval: Duration::ZERO,
            ..RewriteConfig::default()
        }
    }

    fn long_content() -> String {
        (0..8)
            .map(|i| format!("<p>Paragraph {} with enough words to pass the length gate set by the rewriter configuration.</p>", i))
            .collect::<Vec<_>>()
            .join("")
    }

    #[tokio::test]
    async fn well_formed_json_goes_through_strict_path() {
        let content = long_content();
        let raw = format!("{{\"title\": \"Rewritten\", \"content\": \"{}\"}}", content);
        let model = Arc::new(ScriptedModel::new(vec![Ok(raw)]));
        let rewriter = Rewriter::new(Some(model), quick_config());

        let draft = rewriter.rewrite("Original", "Summary").await;
        assert_eq!(draft.title, "Rewritten");
        assert_eq!(draft.content, content);
    }

    #[tokio::test]
    async fn retries_after_failed_call_then_succeeds() {
        let content = long_content();
        let raw = format!("{{\"title\": \"Second Try\", \"content\": \"{}\"}}", content);
        let model = Arc::new(ScriptedModel::new(vec![
            Err(Error::Rewrite("boom".to_string())),
            Ok(raw),
        ]));
        let rewriter = Rewriter::new(Some(model), quick_config());

        let draft = rewriter.rewrite("Original", "Summary").await;
        assert_eq!(draft.title, "Second Try");
    }

    #[tokio::test]
    async fn garbage_responses_fall_back_to_source_text() {
        let model = Arc::new(ScriptedModel::new(vec![
            Ok("no json here".to_string()),
            Ok("still nothing".to_string()),
            Ok("nope".to_string()),
        ]));
        let rewriter = Rewriter::new(Some(model), quick_config());

        let draft = rewriter.rewrite("Original Title", "Original description.").await;
        assert_eq!(draft.title, "Original Title");
        assert_eq!(draft.content, "Original description.");
    }

    #[tokio::test]
    async fn missing_model_passes_source_through() {
        let rewriter = Rewriter::passthrough();
        let draft = rewriter.rewrite("T", "D").await;
        assert_eq!(draft.title, "T");
        assert_eq!(draft.content, "D");
    }

    #[tokio::test]
    async fn content_is_never_empty() {
        let rewriter = Rewriter::passthrough();
        let draft = rewriter.rewrite("T", "some summary").await;
        assert!(draft.content.contains("<p>") || draft.content == "some summary");
    }
}

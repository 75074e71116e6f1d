pub mod client;
pub mod extract;
pub mod limiter;
pub mod rewriter;

pub use client::DeepSeekClient;
pub use extract::ExtractionStrategy;
pub use limiter::RewriteLimiter;
pub use rewriter::{RewriteConfig, Rewriter};

pub mod prelude {
    pub use super::{RewriteConfig, Rewriter};
    pub use cw_core::{CompletionModel, Result, RewrittenDraft};
}

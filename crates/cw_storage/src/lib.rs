pub mod backends;
pub mod publish;

pub use backends::memory::MemoryStore;
pub use backends::postgrest::{PostgrestConfig, PostgrestStore};
pub use publish::compose_article;

pub mod prelude {
    pub use super::backends::memory::MemoryStore;
    pub use super::backends::postgrest::{PostgrestConfig, PostgrestStore};
    pub use cw_core::{ArticleStore, NewsArticle, RecentEntry, Result};
}

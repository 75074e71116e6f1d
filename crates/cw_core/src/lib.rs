pub mod error;
pub mod fetcher;
pub mod model;
pub mod store;
pub mod types;

pub use error::Error;
pub use fetcher::NewsFetcher;
pub use model::CompletionModel;
pub use store::ArticleStore;
pub use types::{Candidate, NewsArticle, Provider, RecentEntry, RewrittenDraft};

pub type Result<T> = std::result::Result<T, Error>;

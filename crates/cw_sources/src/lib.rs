pub mod dedup;
pub mod fetchers;
pub mod keywords;
pub mod pipeline;

pub use dedup::{select_unique, DedupConfig};
pub use fetchers::{GnewsFetcher, NewsApiFetcher};
pub use pipeline::{BatchReport, NewsPipeline, PipelineConfig};

pub mod prelude {
    pub use super::pipeline::{BatchReport, NewsPipeline, PipelineConfig};
    pub use cw_core::{Candidate, NewsFetcher, Provider, Result};
}

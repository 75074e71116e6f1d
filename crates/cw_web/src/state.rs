use std::sync::Arc;

use cw_core::ArticleStore;
use cw_sources::NewsPipeline;

pub struct AppState {
    pub pipeline: Arc<NewsPipeline>,
    pub store: Arc<dyn ArticleStore>,
}

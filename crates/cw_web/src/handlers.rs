use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cw_core::NewsArticle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::error;

const DEFAULT_COUNT: usize = 10;
const LISTING_LIMIT: usize = 50;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub count: Option<usize>,
}

#[derive(Serialize)]
pub struct FetchResponse {
    pub success: bool,
    pub message: String,
    pub articles: Vec<NewsArticle>,
    pub sources: BTreeMap<String, usize>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Trigger one ingestion batch. The body is optional; `count` defaults
/// to 10.
pub async fn fetch_news(
    State(state): State<Arc<AppState>>,
    body: Option<Json<FetchRequest>>,
) -> impl IntoResponse {
    let count = body
        .and_then(|Json(request)| request.count)
        .unwrap_or(DEFAULT_COUNT);

    match state.pipeline.run(count).await {
        Ok(report) => (
            StatusCode::OK,
            Json(FetchResponse {
                success: true,
                message: format!("Published {} articles", report.articles.len()),
                articles: report.articles,
                sources: report.sources,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "news batch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    success: false,
                    error: "Failed to fetch news".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// The most recently published articles, newest first.
pub async fn list_articles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.recent_articles(LISTING_LIMIT).await {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => {
            error!(error = %e, "article listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    success: false,
                    error: "Failed to list articles".to_string(),
                }),
            )
                .into_response()
        }
    }
}

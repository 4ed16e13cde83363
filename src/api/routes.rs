use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    crawl::crawl,
    scrapes::{get_analysis, get_data},
    trends::{get_snapshot, get_trends},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/data", get(get_data))
        .route("/api/analysis", get(get_analysis))
        .route("/api/crawl", get(crawl))
        .route("/api/snapshot", get(get_snapshot))
        .route("/api/trends", get(get_trends))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

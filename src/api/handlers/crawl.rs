use axum::{extract::State, response::Json};
use log::info;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::models::MessageResponse;
use crate::services::collection::CollectionService;

/// Runs a full collection before answering
pub async fn crawl(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>, ApiError> {
    info!("Crawl triggered over HTTP");

    let mut service = CollectionService::new(&state.config).map_err(ApiError::internal)?;
    let path = service.run().await.map_err(ApiError::internal)?;
    info!("Crawl stored {}", path.display());

    Ok(Json(MessageResponse {
        message: "Crawling completed!".to_string(),
    }))
}

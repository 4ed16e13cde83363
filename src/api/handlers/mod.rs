use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;

use crate::analysis::aggregate_history;
use crate::api::models::ErrorResponse;
use crate::config::{AnalysisSettings, AppConfig};
use crate::domain::{ObservationRecord, SnapshotRow};
use crate::rating::RatingNormalizer;
use crate::storage::ScrapeStore;

pub mod crawl;
pub mod scrapes;
pub mod trends;

pub struct AppState {
    pub config: AppConfig,
    pub normalizer: RatingNormalizer,
    pub store: ScrapeStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = ScrapeStore::from_settings(&config.storage)?;
        Ok(Self {
            config,
            normalizer: RatingNormalizer::new(),
            store,
        })
    }
}

/// Error answered as `{"error": ...}` with the given status
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        error!("Request failed: {:#}", err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Rows of the newest scrape file that carry both a title and a year
pub(crate) fn load_snapshot(store: &ScrapeStore) -> Result<Vec<SnapshotRow>, ApiError> {
    let scrape = store
        .load_latest()
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "No CSV files found."))?;

    if scrape.rows.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "CSV contains no data."));
    }

    Ok(scrape
        .rows
        .into_iter()
        .filter(|row| !row.title.is_empty() && row.year.is_some())
        .collect())
}

pub(crate) fn load_history(
    store: &ScrapeStore,
    settings: &AnalysisSettings,
) -> Result<Vec<ObservationRecord>, ApiError> {
    let scrapes = store.load_all().map_err(ApiError::internal)?;
    if scrapes.is_empty() {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "No CSV files found"));
    }
    Ok(aggregate_history(&scrapes, settings))
}

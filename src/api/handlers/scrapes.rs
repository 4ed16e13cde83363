use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::{load_history, load_snapshot, ApiError, AppState};
use crate::domain::{ObservationRecord, SnapshotRow};

pub async fn get_data(State(state): State<Arc<AppState>>) -> Result<Json<Vec<SnapshotRow>>, ApiError> {
    load_snapshot(&state.store).map(Json)
}

pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ObservationRecord>>, ApiError> {
    load_history(&state.store, &state.config.analysis).map(Json)
}

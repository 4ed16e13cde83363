use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::{load_history, load_snapshot, ApiError, AppState};
use crate::api::models::TrendsResponse;
use crate::domain::{DisplayRow, Metric};
use crate::presentation::SnapshotPresenter;
use crate::series::{build_series, styles_for, SCORE_DOMAIN};

pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> Result<Json<Vec<DisplayRow>>, ApiError> {
    let rows = load_snapshot(&state.store)?;
    let presenter = SnapshotPresenter::new(&state.normalizer);
    Ok(Json(presenter.present(&rows)))
}

pub async fn get_trends(State(state): State<Arc<AppState>>) -> Result<Json<TrendsResponse>, ApiError> {
    let records = load_history(&state.store, &state.config.analysis)?;
    let table = build_series(&records);

    let score_styles = styles_for(&table.titles, Metric::Score);
    let vote_count_styles = styles_for(&table.titles, Metric::VoteCount);

    Ok(Json(TrendsResponse::new(table, score_styles, vote_count_styles, SCORE_DOMAIN)))
}

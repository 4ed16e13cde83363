use serde::Serialize;

use crate::domain::{PivotRow, SeriesTable};
use crate::series::SeriesStyle;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Chart-ready trend view: the pivoted table plus per-series styling
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub rows: Vec<PivotRow>,
    pub titles: Vec<String>,
    pub last_updated: Option<String>,
    pub score_styles: Vec<SeriesStyle>,
    pub vote_count_styles: Vec<SeriesStyle>,
    pub score_domain: (f64, f64),
}

impl TrendsResponse {
    pub fn new(table: SeriesTable, score_styles: Vec<SeriesStyle>, vote_count_styles: Vec<SeriesStyle>, score_domain: (f64, f64)) -> Self {
        Self {
            rows: table.rows,
            titles: table.titles,
            last_updated: table.last_updated,
            score_styles,
            vote_count_styles,
            score_domain,
        }
    }
}

use log::warn;
use serde_json::Value;

use super::error::SourceError;
use crate::domain::{ObservationRecord, SnapshotRow};

/// Accept only a JSON array; anything else fails the whole source
pub fn expect_sequence(url: &str, value: Value) -> Result<Vec<Value>, SourceError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(SourceError::NotASequence {
            url: url.to_string(),
            found: json_kind(&other),
        }),
    }
}

/// Every element becomes a row, so ranks stay aligned even when an element is malformed
pub fn decode_snapshot_rows(items: Vec<Value>) -> Vec<SnapshotRow> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                warn!("Snapshot record {} is malformed ({}), showing placeholders", idx + 1, e);
                SnapshotRow::default()
            })
        })
        .collect()
}

/// Elements without a title or scrape time cannot be placed in a series and are skipped
pub fn decode_observations(items: Vec<Value>) -> Vec<ObservationRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping observation record {}: {}", idx + 1, e);
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

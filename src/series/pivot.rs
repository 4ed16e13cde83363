use log::debug;
use std::collections::{BTreeMap, HashSet};

use crate::domain::{Metric, ObservationRecord, PivotRow, ScrapeTime, SeriesTable};

/// Reshapes long-form observations (one per title per scrape) into a wide table
/// with one row per scrape time and one series per (title, metric).
pub fn build_series(records: &[ObservationRecord]) -> SeriesTable {
    // 1. Series enumeration order: first occurrence of each title
    let titles = collect_titles(records);

    // 2 + 3. Rows keyed by scrape time; the map keeps them in ascending token order
    let rows = build_rows(records);

    // 4. Most recent scrape, formatted for display
    let last_updated = rows.last().map(|row| row.scrape_time.to_readable());

    debug!(
        "Pivoted {} observations into {} rows x {} titles",
        records.len(),
        rows.len(),
        titles.len()
    );

    SeriesTable {
        rows,
        titles,
        last_updated,
    }
}

fn collect_titles(records: &[ObservationRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.title.as_str()))
        .map(|record| record.title.clone())
        .collect()
}

fn build_rows(records: &[ObservationRecord]) -> Vec<PivotRow> {
    let mut rows: BTreeMap<&ScrapeTime, PivotRow> = BTreeMap::new();

    for record in records {
        let row = rows
            .entry(&record.scrape_time)
            .or_insert_with(|| PivotRow::new(record.scrape_time.clone()));
        apply_observation(row, record);
    }

    rows.into_values().collect()
}

/// Later records for the same (title, time) replace earlier ones, absent metrics included
fn apply_observation(row: &mut PivotRow, record: &ObservationRecord) {
    for metric in Metric::ALL {
        row.set(&record.title, metric, record.metric(metric));
    }
}

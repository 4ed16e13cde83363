use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use super::scrape_time::ScrapeTime;
use super::values::{lenient_score, lenient_text, lenient_title, lenient_vote_count};
use crate::rating::RatingCategory;

// --- Raw records (scrape files and HTTP sources) ---

/// One ranked chart entry. Order within a snapshot is the ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    #[serde(rename = "Title", default, deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(rename = "Year", default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(rename = "Duration", default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "lenient_text")]
    pub raw_rating: Option<String>,
    #[serde(rename = "IMDbScore", default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(rename = "VoteCount", default, deserialize_with = "lenient_vote_count")]
    pub vote_count: Option<u64>,
    #[serde(rename = "Link", default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
    #[serde(rename = "Poster", default, deserialize_with = "lenient_text")]
    pub poster_url: Option<String>,
}

/// One historical measurement of a title at a given scrape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "ScrapeTime")]
    pub scrape_time: ScrapeTime,
    #[serde(rename = "IMDbScore", default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(rename = "VoteCount", default, deserialize_with = "lenient_vote_count")]
    pub vote_count: Option<u64>,
}

impl ObservationRecord {
    pub fn new(title: impl Into<String>, scrape_time: impl Into<ScrapeTime>) -> Self {
        Self {
            title: title.into(),
            scrape_time: scrape_time.into(),
            score: None,
            vote_count: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_vote_count(mut self, vote_count: u64) -> Self {
        self.vote_count = Some(vote_count);
        self
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Score => self.score,
            Metric::VoteCount => self.vote_count.map(|votes| votes as f64),
        }
    }
}

/// Rows of a single scrape file, tagged with the file's timestamp token
#[derive(Debug, Clone)]
pub struct Scrape {
    pub scrape_time: ScrapeTime,
    pub rows: Vec<SnapshotRow>,
}

// --- Derived structures ---

/// The two charted metrics of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Score,
    VoteCount,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Score, Metric::VoteCount];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Score => "score",
            Metric::VoteCount => "voteCount",
        }
    }

    /// Column name used when a pivot row is flattened for the wire: `"{title}:{metric}"`
    pub fn column_name(&self, title: &str) -> String {
        format!("{}:{}", title, self.key())
    }
}

/// Display-ready form of a snapshot row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub rank: usize,
    pub title: String,
    pub link: Option<String>,
    pub poster_url: Option<String>,
    pub year: Option<String>,
    pub duration: Option<String>,
    pub rating: RatingCategory,
    pub score: String,
    pub votes: String,
    pub meta: String,
}

/// One time point of the trend table.
///
/// Only observed (title, metric) pairs are stored; a missing pair is a gap, never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub scrape_time: ScrapeTime,
    values: BTreeMap<String, BTreeMap<Metric, f64>>,
}

impl PivotRow {
    pub fn new(scrape_time: ScrapeTime) -> Self {
        Self {
            scrape_time,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, title: &str, metric: Metric) -> Option<f64> {
        self.values.get(title)?.get(&metric).copied()
    }

    pub fn set(&mut self, title: &str, metric: Metric, value: Option<f64>) {
        match value {
            Some(value) => {
                self.values
                    .entry(title.to_string())
                    .or_default()
                    .insert(metric, value);
            }
            None => self.clear(title, metric),
        }
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.values.get(title).is_some_and(|metrics| !metrics.is_empty())
    }

    /// Number of populated (title, metric) cells
    pub fn len(&self) -> usize {
        self.values.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self, title: &str, metric: Metric) {
        if let Some(metrics) = self.values.get_mut(title) {
            metrics.remove(&metric);
            if metrics.is_empty() {
                self.values.remove(title);
            }
        }
    }
}

impl Serialize for PivotRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len() + 1))?;
        map.serialize_entry("scrapeTime", &self.scrape_time)?;
        for (title, metrics) in &self.values {
            for (metric, value) in metrics {
                let column = metric.column_name(title);
                match metric {
                    Metric::Score => map.serialize_entry(&column, value)?,
                    Metric::VoteCount => map.serialize_entry(&column, &(value.round() as u64))?,
                }
            }
        }
        map.end()
    }
}

/// Wide-form trend data: one row per scrape time, one series per (title, metric)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesTable {
    pub rows: Vec<PivotRow>,
    pub titles: Vec<String>,
    pub last_updated: Option<String>,
}

impl SeriesTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One value per row for the given series, gaps preserved as `None`
    pub fn series(&self, title: &str, metric: Metric) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.get(title, metric)).collect()
    }

    pub fn scrape_times(&self) -> impl Iterator<Item = &ScrapeTime> {
        self.rows.iter().map(|row| &row.scrape_time)
    }
}

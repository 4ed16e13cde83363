use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::StorageSettings;
use crate::domain::{parse_score, parse_vote_count, Scrape, ScrapeTime, SnapshotRow};

const EXTENSION: &str = "csv";

/// Directory of scrape files, one CSV per collection run.
///
/// File names embed the scrape timestamp token (`{prefix}{YYYYMMDD_HHMMSS}.csv`),
/// so sorting by name is sorting by time.
#[derive(Debug, Clone)]
pub struct ScrapeStore {
    data_dir: PathBuf,
    file_prefix: String,
}

impl ScrapeStore {
    /// Create a store, creating the directory if needed
    pub fn new<P: AsRef<Path>>(data_dir: P, file_prefix: &str) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).context("Failed to create scraped data directory")?;

        Ok(Self {
            data_dir,
            file_prefix: file_prefix.to_string(),
        })
    }

    pub fn from_settings(settings: &StorageSettings) -> Result<Self> {
        Self::new(&settings.data_dir, settings.file_prefix)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Scrape files in ascending name (and therefore time) order
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.data_dir)
            .with_context(|| format!("Failed to list {}", self.data_dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            if Self::is_scrape_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Newest scrape, or `None` when nothing has been collected yet
    pub fn load_latest(&self) -> Result<Option<Scrape>> {
        match self.list_files()?.last() {
            Some(path) => self.load_scrape(path).map(Some),
            None => Ok(None),
        }
    }

    /// Every scrape in time order
    pub fn load_all(&self) -> Result<Vec<Scrape>> {
        let files = self.list_files()?;
        let scrapes = files
            .iter()
            .map(|path| self.load_scrape(path))
            .collect::<Result<Vec<_>>>()?;

        info!("Loaded {} scrape files from {}", scrapes.len(), self.data_dir.display());
        Ok(scrapes)
    }

    /// Write a new scrape file and return its path
    pub fn save(&self, scrape_time: &ScrapeTime, rows: &[SnapshotRow]) -> Result<PathBuf> {
        let path = self.build_path(scrape_time);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        for row in rows {
            writer.serialize(row).context("Failed to serialize scrape row")?;
        }
        writer.flush().context("Failed to flush scrape file")?;

        info!("Saved {} rows to {}", rows.len(), path.display());
        Ok(path)
    }

    // --- Helper Methods ---

    fn load_scrape(&self, path: &Path) -> Result<Scrape> {
        let scrape_time = self.scrape_time_for(path);
        let rows = Self::read_rows(path)?;
        debug!("Read {} rows from {}", rows.len(), path.display());
        Ok(Scrape { scrape_time, rows })
    }

    fn read_rows(path: &Path) -> Result<Vec<SnapshotRow>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let rows = reader
            .deserialize()
            .collect::<csv::Result<Vec<StoredRow>>>()
            .with_context(|| format!("Failed to parse scrape file {}", path.display()))?;

        Ok(rows.into_iter().map(SnapshotRow::from).collect())
    }

    fn scrape_time_for(&self, path: &Path) -> ScrapeTime {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let token = stem.strip_prefix(&self.file_prefix).unwrap_or(&stem);
        ScrapeTime::new(token)
    }

    fn build_path(&self, scrape_time: &ScrapeTime) -> PathBuf {
        self.data_dir
            .join(format!("{}{}.{}", self.file_prefix, scrape_time, EXTENSION))
    }

    fn is_scrape_file(path: &Path) -> bool {
        path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION)
    }
}

/// A scrape file line exactly as written. Every cell stays text until it is converted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredRow {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Duration")]
    duration: Option<String>,
    #[serde(rename = "Rating")]
    rating: Option<String>,
    #[serde(rename = "IMDbScore")]
    score: Option<String>,
    #[serde(rename = "VoteCount")]
    vote_count: Option<String>,
    #[serde(rename = "Link")]
    link: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl From<StoredRow> for SnapshotRow {
    fn from(row: StoredRow) -> Self {
        Self {
            title: row.title.unwrap_or_default(),
            year: row.year,
            duration: row.duration,
            raw_rating: row.rating,
            score: row.score.as_deref().and_then(parse_score),
            vote_count: row.vote_count.as_deref().and_then(parse_vote_count),
            link: row.link,
            poster_url: row.poster,
        }
    }
}

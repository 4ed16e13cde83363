use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::domain::ScrapeTime;
use crate::fetchers::ChartScraper;
use crate::storage::ScrapeStore;

/// One collection run: scrape the chart and store it as a new scrape file
pub struct CollectionService {
    store: ScrapeStore,
    scraper: ChartScraper,
}

impl CollectionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            store: ScrapeStore::from_settings(&config.storage)?,
            scraper: ChartScraper::new(&config.scraper)?,
        })
    }

    pub async fn run(&mut self) -> Result<PathBuf> {
        info!("=== Starting Collection Run ===");

        // Step 1: Scrape the chart
        let rows = self.scraper.scrape_chart().await?;
        info!("  → Scraped {} entries", rows.len());

        // Step 2: Store as a new scrape file
        let scrape_time = ScrapeTime::now();
        let path = self.store.save(&scrape_time, &rows)?;
        info!("  → Saved scrape {} to {}", scrape_time, path.display());

        info!("=== Collection Complete ===");
        Ok(path)
    }
}

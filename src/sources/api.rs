use anyhow::{Context, Result};
use log::info;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::decode::{decode_observations, decode_snapshot_rows, expect_sequence};
use super::error::SourceError;
use super::{CollectionTrigger, HistorySource, SnapshotSource};
use crate::config::DashboardSettings;
use crate::domain::{ObservationRecord, SnapshotRow};

const SNAPSHOT_PATH: &str = "/api/data";
const HISTORY_PATH: &str = "/api/analysis";
const CRAWL_PATH: &str = "/api/crawl";

/// Client for the backend's JSON API; serves as both data sources and the trigger
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &DashboardSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str) -> Result<(String, Value), SourceError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                url,
                status: response.status(),
            });
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|source| SourceError::Decode {
                url: url.clone(),
                source,
            })?;

        Ok((url, value))
    }

    async fn get_sequence(&self, path: &str) -> Result<Vec<Value>, SourceError> {
        let (url, value) = self.get_json(path).await?;
        expect_sequence(&url, value)
    }
}

impl SnapshotSource for ApiClient {
    async fn fetch_snapshot(&self) -> Result<Vec<SnapshotRow>, SourceError> {
        let items = self.get_sequence(SNAPSHOT_PATH).await?;
        info!("Fetched {} snapshot records", items.len());
        Ok(decode_snapshot_rows(items))
    }
}

impl HistorySource for ApiClient {
    async fn fetch_history(&self) -> Result<Vec<ObservationRecord>, SourceError> {
        let items = self.get_sequence(HISTORY_PATH).await?;
        info!("Fetched {} historical records", items.len());
        Ok(decode_observations(items))
    }
}

impl CollectionTrigger for ApiClient {
    async fn trigger_collection(&self) -> Result<(), SourceError> {
        let (_, value) = self.get_json(CRAWL_PATH).await?;
        info!("Collection run finished: {}", value);
        Ok(())
    }
}

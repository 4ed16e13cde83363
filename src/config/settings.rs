#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub chart_url: &'static str,
    pub site_base_url: &'static str,
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub max_entries: usize,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            chart_url: "https://www.imdb.com/chart/moviemeter/",
            site_base_url: "https://www.imdb.com",
            rate_limit_ms: 1000,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
            timeout_secs: 30,
            max_entries: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub data_dir: String,
    pub file_prefix: &'static str,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: std::env::var("SCRAPED_DATA_DIR")
                .unwrap_or_else(|_| "scraped_data".to_string()),
            file_prefix: "imdb_popular_movies_",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// How many of the most frequently scraped titles the trend view follows
    pub top_n: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub storage: StorageSettings,
    pub analysis: AnalysisSettings,
    pub dashboard: DashboardSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scraper: ScraperSettings::default(),
            storage: StorageSettings::default(),
            analysis: AnalysisSettings::default(),
            dashboard: DashboardSettings::default(),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<String>) -> Self {
        self.storage.data_dir = data_dir.into();
        self
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.dashboard.api_base_url = api_base_url.into();
        self
    }
}

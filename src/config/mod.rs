pub mod settings;

pub use settings::{AnalysisSettings, AppConfig, DashboardSettings, ScraperSettings, StorageSettings};

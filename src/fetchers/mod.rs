pub mod chart_scraper;

pub use chart_scraper::{ChartParser, ChartScraper};

pub mod scrape_store;

pub use scrape_store::ScrapeStore;

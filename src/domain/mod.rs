pub mod models;
pub mod scrape_time;
pub mod values;

pub use models::*;
pub use scrape_time::ScrapeTime;
pub use values::{parse_score, parse_vote_count};

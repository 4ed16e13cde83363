pub mod normalizer;
pub mod types;

pub use normalizer::{RatingNormalizer, RATING_TABLE};
pub use types::RatingCategory;

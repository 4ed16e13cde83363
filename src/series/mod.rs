pub mod pivot;
pub mod style;

pub use pivot::build_series;
pub use style::{color_for, styles_for, SeriesStyle, PALETTE, SCORE_DOMAIN};

use serde::Serialize;

use crate::domain::Metric;

pub const PALETTE: [&str; 5] = ["#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f"];

const VOTE_COUNT_DASH: &str = "4 4";

/// Fixed Y range of the score chart
pub const SCORE_DOMAIN: (f64, f64) = (0.0, 10.0);

/// Line styling of one series. Depends only on the title's position in `titles`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub title: String,
    pub metric: &'static str,
    pub color: &'static str,
    pub dash: Option<&'static str>,
}

impl SeriesStyle {
    /// Color as an `(r, g, b)` triple, for sinks that cannot take hex strings
    pub fn rgb(&self) -> (u8, u8, u8) {
        hex_to_rgb(self.color)
    }
}

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn dash_for(metric: Metric) -> Option<&'static str> {
    match metric {
        Metric::Score => None,
        Metric::VoteCount => Some(VOTE_COUNT_DASH),
    }
}

pub fn styles_for(titles: &[String], metric: Metric) -> Vec<SeriesStyle> {
    titles
        .iter()
        .enumerate()
        .map(|(idx, title)| SeriesStyle {
            title: title.clone(),
            metric: metric.key(),
            color: color_for(idx),
            dash: dash_for(metric),
        })
        .collect()
}

fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("Movie {i}")).collect()
    }

    #[test]
    fn test_palette_wraps_around() {
        assert_eq!(color_for(0), "#4e79a7");
        assert_eq!(color_for(4), "#59a14f");
        assert_eq!(color_for(5), "#4e79a7");
        assert_eq!(color_for(12), "#e15759");
    }

    #[test]
    fn test_styles_follow_title_order() {
        let styles = styles_for(&titles(7), Metric::Score);

        assert_eq!(styles.len(), 7);
        assert_eq!(styles[1].color, "#f28e2b");
        assert_eq!(styles[6].color, styles[1].color);
        assert!(styles.iter().all(|style| style.dash.is_none()));
    }

    #[test]
    fn test_vote_count_series_are_dashed() {
        let styles = styles_for(&titles(2), Metric::VoteCount);

        assert!(styles.iter().all(|style| style.dash == Some("4 4")));
        assert_eq!(styles[0].metric, "voteCount");
    }

    #[test]
    fn test_rgb_conversion() {
        let style = &styles_for(&titles(1), Metric::Score)[0];
        assert_eq!(style.rgb(), (0x4e, 0x79, 0xa7));
    }
}

use crate::domain::{DisplayRow, SnapshotRow};
use crate::rating::RatingNormalizer;

const PLACEHOLDER: &str = "N/A";
const META_SEPARATOR: &str = " · ";

/// Turns the latest snapshot into display rows.
///
/// Input order is the ranking: rows are never reordered, filtered or merged.
pub struct SnapshotPresenter<'a> {
    normalizer: &'a RatingNormalizer,
}

impl<'a> SnapshotPresenter<'a> {
    pub fn new(normalizer: &'a RatingNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn present(&self, records: &[SnapshotRow]) -> Vec<DisplayRow> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| self.present_row(idx + 1, record))
            .collect()
    }

    fn present_row(&self, rank: usize, record: &SnapshotRow) -> DisplayRow {
        let rating = self.normalizer.normalize(record.raw_rating.as_deref());

        DisplayRow {
            rank,
            title: record.title.clone(),
            link: record.link.clone(),
            poster_url: record.poster_url.clone(),
            year: record.year.clone(),
            duration: record.duration.clone(),
            rating,
            score: format_score(record.score),
            votes: format_votes(record.vote_count),
            meta: build_meta(record, rating.as_str()),
        }
    }
}

fn format_score(score: Option<f64>) -> String {
    score
        .map(|value| value.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn format_votes(vote_count: Option<u64>) -> String {
    vote_count
        .map(|votes| format!("{} votes", votes))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn build_meta(record: &SnapshotRow, rating: &str) -> String {
    [
        record.year.as_deref().unwrap_or(PLACEHOLDER),
        record.duration.as_deref().unwrap_or(PLACEHOLDER),
        rating,
    ]
    .join(META_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingCategory;

    fn row(title: &str) -> SnapshotRow {
        SnapshotRow {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_snapshot_presents_nothing() {
        let normalizer = RatingNormalizer::new();
        assert!(SnapshotPresenter::new(&normalizer).present(&[]).is_empty());
    }

    #[test]
    fn test_rank_is_position() {
        let normalizer = RatingNormalizer::new();
        let records = vec![row("Zebra"), row("Apple"), row("Apple")];

        let rows = SnapshotPresenter::new(&normalizer).present(&records);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].title, "Apple");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn test_full_record_formatting() {
        let normalizer = RatingNormalizer::new();
        let record = SnapshotRow {
            title: "Dune: Part Two".to_string(),
            year: Some("2024".to_string()),
            duration: Some("2h 46m".to_string()),
            raw_rating: Some("pg-13".to_string()),
            score: Some(8.6),
            vote_count: Some(512_000),
            link: Some("https://www.imdb.com/title/tt15239678/".to_string()),
            poster_url: Some("https://m.media-amazon.com/images/dune.jpg".to_string()),
        };

        let rows = SnapshotPresenter::new(&normalizer).present(&[record]);

        assert_eq!(rows[0].rating, RatingCategory::PG13);
        assert_eq!(rows[0].score, "8.6");
        assert_eq!(rows[0].votes, "512000 votes");
        assert_eq!(rows[0].meta, "2024 · 2h 46m · PG13");
    }

    #[test]
    fn test_malformed_record_gets_placeholders() {
        let normalizer = RatingNormalizer::new();

        let rows = SnapshotPresenter::new(&normalizer).present(&[row("Untitled Project")]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rating, RatingCategory::AllAges);
        assert_eq!(rows[0].score, "N/A");
        assert_eq!(rows[0].votes, "N/A");
        assert_eq!(rows[0].link, None);
        assert_eq!(rows[0].meta, "N/A · N/A · All Ages");
    }

    #[test]
    fn test_zero_votes_are_not_missing() {
        let normalizer = RatingNormalizer::new();
        let record = SnapshotRow {
            score: Some(0.0),
            vote_count: Some(0),
            ..row("New Release")
        };

        let rows = SnapshotPresenter::new(&normalizer).present(&[record]);

        assert_eq!(rows[0].score, "0");
        assert_eq!(rows[0].votes, "0 votes");
    }
}

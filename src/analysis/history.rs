use log::info;
use std::collections::{BTreeMap, HashMap};

use crate::config::AnalysisSettings;
use crate::domain::values::to_vote_count;
use crate::domain::{ObservationRecord, Scrape, ScrapeTime, SnapshotRow};

/// Builds the historical observation sequence served to the trend view.
///
/// Rows without a title or score are dropped, only the `top_n` most frequently
/// scraped titles are kept, and repeated (title, scrape) pairs are averaged.
pub fn aggregate_history(scrapes: &[Scrape], settings: &AnalysisSettings) -> Vec<ObservationRecord> {
    let scored = collect_scored_rows(scrapes);
    info!("Found {} scored rows across {} scrapes", scored.len(), scrapes.len());

    let top_titles = select_top_titles(&scored, settings.top_n);
    info!("Following titles: {:?}", top_titles);

    let groups = group_by_title_and_time(&scored, &top_titles);
    groups
        .into_iter()
        .map(|((title, scrape_time), totals)| totals.into_record(title, scrape_time))
        .collect()
}

struct ScoredRow<'a> {
    scrape_time: &'a ScrapeTime,
    row: &'a SnapshotRow,
}

fn collect_scored_rows(scrapes: &[Scrape]) -> Vec<ScoredRow<'_>> {
    scrapes
        .iter()
        .flat_map(|scrape| {
            scrape.rows.iter().map(move |row| ScoredRow {
                scrape_time: &scrape.scrape_time,
                row,
            })
        })
        .filter(|scored| !scored.row.title.trim().is_empty() && scored.row.score.is_some())
        .collect()
}

/// Titles ordered by number of appearances, ties broken by first appearance
fn select_top_titles(scored: &[ScoredRow<'_>], top_n: usize) -> Vec<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, scored) in scored.iter().enumerate() {
        let entry = counts.entry(scored.row.title.as_str()).or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(title, _)| title.to_string())
        .collect()
}

fn group_by_title_and_time(
    scored: &[ScoredRow<'_>],
    top_titles: &[String],
) -> BTreeMap<(String, ScrapeTime), MetricTotals> {
    let mut groups: BTreeMap<(String, ScrapeTime), MetricTotals> = BTreeMap::new();

    for scored in scored {
        if !top_titles.contains(&scored.row.title) {
            continue;
        }
        groups
            .entry((scored.row.title.clone(), scored.scrape_time.clone()))
            .or_default()
            .add(scored.row);
    }

    groups
}

#[derive(Default)]
struct MetricTotals {
    score_sum: f64,
    score_count: usize,
    vote_sum: f64,
    vote_count: usize,
}

impl MetricTotals {
    fn add(&mut self, row: &SnapshotRow) {
        if let Some(score) = row.score {
            self.score_sum += score;
            self.score_count += 1;
        }
        if let Some(votes) = row.vote_count {
            self.vote_sum += votes as f64;
            self.vote_count += 1;
        }
    }

    fn into_record(self, title: String, scrape_time: ScrapeTime) -> ObservationRecord {
        ObservationRecord {
            title,
            scrape_time,
            score: mean(self.score_sum, self.score_count),
            vote_count: mean(self.vote_sum, self.vote_count).and_then(to_vote_count),
        }
    }
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, score: Option<f64>, votes: Option<u64>) -> SnapshotRow {
        SnapshotRow {
            title: title.to_string(),
            score,
            vote_count: votes,
            ..Default::default()
        }
    }

    fn scrape(token: &str, rows: Vec<SnapshotRow>) -> Scrape {
        Scrape {
            scrape_time: ScrapeTime::new(token),
            rows,
        }
    }

    #[test]
    fn test_drops_untitled_and_unscored_rows() {
        let scrapes = vec![scrape(
            "20240101_000000",
            vec![row("", Some(7.0), None), row("A", None, Some(10)), row("B", Some(6.0), Some(20))],
        )];

        let records = aggregate_history(&scrapes, &AnalysisSettings { top_n: 5 });

        assert_eq!(records, [ObservationRecord::new("B", "20240101_000000").with_score(6.0).with_vote_count(20)]);
    }

    #[test]
    fn test_keeps_most_frequent_titles() {
        let scrapes = vec![
            scrape("T1", vec![row("Rare", Some(5.0), None), row("Common", Some(7.0), None)]),
            scrape("T2", vec![row("Common", Some(7.1), None), row("Steady", Some(8.0), None)]),
            scrape("T3", vec![row("Common", Some(7.2), None), row("Steady", Some(8.1), None)]),
        ];

        let records = aggregate_history(&scrapes, &AnalysisSettings { top_n: 2 });
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles, ["Common", "Common", "Common", "Steady", "Steady"]);
    }

    #[test]
    fn test_ties_go_to_first_seen_title() {
        let scrapes = vec![scrape(
            "T1",
            vec![row("B", Some(1.0), None), row("A", Some(2.0), None), row("C", Some(3.0), None)],
        )];

        let top = select_top_titles(&collect_scored_rows(&scrapes), 2);

        assert_eq!(top, ["B", "A"]);
    }

    #[test]
    fn test_repeated_rows_are_averaged() {
        let scrapes = vec![scrape(
            "T1",
            vec![
                row("A", Some(7.0), Some(100)),
                row("A", Some(8.0), None),
                row("A", Some(9.0), Some(201)),
            ],
        )];

        let records = aggregate_history(&scrapes, &AnalysisSettings::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, Some(8.0));
        assert_eq!(records[0].vote_count, Some(151));
    }

    #[test]
    fn test_output_ordered_by_title_then_time() {
        let scrapes = vec![
            scrape("20240102_000000", vec![row("B", Some(1.0), None), row("A", Some(1.0), None)]),
            scrape("20240101_000000", vec![row("A", Some(2.0), None), row("B", Some(2.0), None)]),
        ];

        let records = aggregate_history(&scrapes, &AnalysisSettings::default());
        let keys: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.title.as_str(), r.scrape_time.as_str()))
            .collect();

        assert_eq!(
            keys,
            [
                ("A", "20240101_000000"),
                ("A", "20240102_000000"),
                ("B", "20240101_000000"),
                ("B", "20240102_000000"),
            ]
        );
    }
}

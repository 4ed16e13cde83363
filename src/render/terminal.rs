use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;

use super::{RenderSink, NO_DATA};
use crate::domain::{DisplayRow, Metric, SeriesTable};
use crate::series::{styles_for, SeriesStyle, SCORE_DOMAIN};

const GAP: &str = "-";
const MAX_TITLE_WIDTH: usize = 32;
const MIN_CELL_WIDTH: usize = 6;

/// Plain-text rendering of both views, one table per chart
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.out, "{}", line.as_ref()).context("Failed to write to terminal")
    }

    fn write_heading(&mut self, heading: &str) -> Result<()> {
        self.write_line("")?;
        self.write_line(heading.bold().to_string())
    }

    fn write_no_data(&mut self) -> Result<()> {
        self.write_line(format!("  {}", NO_DATA.dimmed()))
    }

    fn write_movie(&mut self, row: &DisplayRow) -> Result<()> {
        self.write_line(format!("{} {}", format!("#{:<3}", row.rank).yellow(), row.title.bold()))?;
        self.write_line(format!("     {}", row.meta))?;
        self.write_line(format!("     ⭐ {}   {}", row.score, row.votes))?;
        if let Some(link) = &row.link {
            self.write_line(format!("     {}", link.underline()))?;
        }
        Ok(())
    }

    fn write_chart(&mut self, table: &SeriesTable, metric: Metric) -> Result<()> {
        let labels: Vec<String> = table.scrape_times().map(|t| t.to_axis_label()).collect();
        let styles = styles_for(&table.titles, metric);

        let cells: Vec<Vec<String>> = table
            .titles
            .iter()
            .map(|title| {
                table
                    .series(title, metric)
                    .into_iter()
                    .map(|value| format_cell(value, metric))
                    .collect()
            })
            .collect();

        let title_width = table
            .titles
            .iter()
            .map(|title| title.chars().count().min(MAX_TITLE_WIDTH))
            .max()
            .unwrap_or(0);
        let cell_width = labels
            .iter()
            .chain(cells.iter().flatten())
            .map(|text| text.chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_CELL_WIDTH);

        let header: Vec<String> = labels.iter().map(|label| pad_left(label, cell_width)).collect();
        self.write_line(format!("  {}  {}", pad_right("", title_width), header.join("  ")).dimmed().to_string())?;

        for (style, row_cells) in styles.iter().zip(&cells) {
            self.write_series(style, row_cells, title_width, cell_width)?;
        }
        Ok(())
    }

    fn write_series(
        &mut self,
        style: &SeriesStyle,
        cells: &[String],
        title_width: usize,
        cell_width: usize,
    ) -> Result<()> {
        let (r, g, b) = style.rgb();
        let marker = if style.dash.is_some() { "╌" } else { "━" };
        let name = pad_right(&truncate(&style.title, title_width), title_width);

        let values: Vec<String> = cells
            .iter()
            .map(|cell| {
                let padded = pad_left(cell, cell_width);
                if cell == GAP {
                    padded.dimmed().to_string()
                } else {
                    padded
                }
            })
            .collect();

        self.write_line(format!(
            "{} {}  {}",
            marker.truecolor(r, g, b),
            name.truecolor(r, g, b),
            values.join("  ")
        ))
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render_snapshot(&mut self, rows: &[DisplayRow], last_updated: Option<&str>) -> Result<()> {
        self.write_heading("🎬 IMDb Top 10 Popular Movies")?;
        if let Some(last_updated) = last_updated {
            self.write_line(format!("Last scraped at: {}", last_updated).italic().to_string())?;
        }

        if rows.is_empty() {
            return self.write_no_data();
        }
        for row in rows {
            self.write_movie(row)?;
        }
        Ok(())
    }

    fn render_trends(&mut self, table: &SeriesTable) -> Result<()> {
        self.write_heading(&format!(
            "⭐ Top {} Movies Rating Score Over Time ({}-{})",
            table.titles.len(),
            SCORE_DOMAIN.0,
            SCORE_DOMAIN.1
        ))?;
        if table.is_empty() {
            self.write_no_data()?;
        } else {
            self.write_chart(table, Metric::Score)?;
        }

        self.write_heading(&format!(
            "👥 Top {} Movies Rating Count Over Time",
            table.titles.len()
        ))?;
        if table.is_empty() {
            self.write_no_data()?;
        } else {
            self.write_chart(table, Metric::VoteCount)?;
        }

        self.out.flush().context("Failed to flush terminal output")
    }
}

fn format_cell(value: Option<f64>, metric: Metric) -> String {
    match (value, metric) {
        (None, _) => GAP.to_string(),
        (Some(score), Metric::Score) => format!("{:.1}", score),
        (Some(votes), Metric::VoteCount) => group_thousands(votes.round() as u64),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ObservationRecord, SnapshotRow};
    use crate::presentation::SnapshotPresenter;
    use crate::rating::RatingNormalizer;
    use crate::series::build_series;

    fn render(f: impl FnOnce(&mut TerminalRenderer<Vec<u8>>) -> Result<()>) -> String {
        colored::control::set_override(false);
        let mut renderer = TerminalRenderer::new(Vec::new());
        f(&mut renderer).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_snapshot_shows_no_data() {
        let output = render(|r| r.render_snapshot(&[], None));

        assert!(output.contains("No data available"));
        assert!(!output.contains("Last scraped at"));
    }

    #[test]
    fn test_empty_trends_show_no_data_twice() {
        let output = render(|r| r.render_trends(&SeriesTable::default()));

        assert_eq!(output.matches("No data available").count(), 2);
    }

    #[test]
    fn test_snapshot_lists_ranked_movies() {
        let normalizer = RatingNormalizer::new();
        let rows = SnapshotPresenter::new(&normalizer).present(&[
            SnapshotRow {
                title: "Wicked".to_string(),
                score: Some(7.6),
                vote_count: Some(98_000),
                ..Default::default()
            },
            SnapshotRow {
                title: "Gladiator II".to_string(),
                ..Default::default()
            },
        ]);

        let output = render(|r| r.render_snapshot(&rows, Some("5 Mar 2024, 14:07")));

        assert!(output.contains("Last scraped at: 5 Mar 2024, 14:07"));
        assert!(output.contains("#1   Wicked"));
        assert!(output.contains("⭐ 7.6   98000 votes"));
        assert!(output.contains("#2   Gladiator II"));
        assert!(output.contains("⭐ N/A   N/A"));
    }

    #[test]
    fn test_trend_gaps_are_not_zero() {
        let table = build_series(&[
            ObservationRecord::new("A", "20240101_100000").with_score(7.0).with_vote_count(1500),
            ObservationRecord::new("B", "20240101_100000").with_score(6.5),
            ObservationRecord::new("A", "20240102_100000").with_score(7.3),
        ]);

        let output = render(|r| r.render_trends(&table));
        let lines: Vec<&str> = output.lines().collect();
        let b_scores = lines.iter().find(|l| l.starts_with("━ B")).unwrap();
        let a_votes = lines.iter().find(|l| l.starts_with("╌ A")).unwrap();

        assert!(output.contains("1 Jan, 10:00"));
        assert!(output.contains("2 Jan, 10:00"));
        assert!(b_scores.contains("6.5"));
        assert!(b_scores.trim_end().ends_with(GAP));
        assert!(a_votes.contains("1,500"));
        assert!(a_votes.trim_end().ends_with(GAP));
        assert!(!output.contains("0.0"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate_long_titles() {
        assert_eq!(truncate("Short", 10), "Short");
        assert_eq!(truncate("A Very Long Title", 7), "A Very…");
    }
}

use anyhow::Result;
use log::{error, info};

use crate::domain::{DisplayRow, SeriesTable};
use crate::presentation::SnapshotPresenter;
use crate::rating::RatingNormalizer;
use crate::render::RenderSink;
use crate::series::build_series;
use crate::sources::{CollectionTrigger, HistorySource, SnapshotSource, SourceError};

/// Both views after one fetch-and-rebuild cycle
pub struct DashboardView {
    pub display_rows: Vec<DisplayRow>,
    pub table: SeriesTable,
    pub snapshot_error: Option<SourceError>,
    pub history_error: Option<SourceError>,
}

/// Fetches both sources, runs the transforms and hands the result to a sink.
///
/// A failing source only empties its own view.
pub struct DashboardService<S, H> {
    snapshot_source: S,
    history_source: H,
    normalizer: RatingNormalizer,
}

impl<S: SnapshotSource, H: HistorySource> DashboardService<S, H> {
    pub fn new(snapshot_source: S, history_source: H, normalizer: RatingNormalizer) -> Self {
        Self {
            snapshot_source,
            history_source,
            normalizer,
        }
    }

    pub async fn load(&self) -> DashboardView {
        let (snapshot, history) = tokio::join!(
            self.snapshot_source.fetch_snapshot(),
            self.history_source.fetch_history()
        );

        let (snapshot, snapshot_error) = isolate_failure(snapshot, "Error fetching data");
        let (history, history_error) = isolate_failure(history, "Error loading trend data");

        let display_rows = SnapshotPresenter::new(&self.normalizer).present(&snapshot);
        let table = build_series(&history);
        info!(
            "Built {} display rows and {} trend rows for {} titles",
            display_rows.len(),
            table.rows.len(),
            table.titles.len()
        );

        DashboardView {
            display_rows,
            table,
            snapshot_error,
            history_error,
        }
    }

    pub async fn refresh<R: RenderSink>(&self, sink: &mut R) -> Result<DashboardView> {
        let view = self.load().await;
        render_view(&view, sink)?;
        Ok(view)
    }

    /// Run a collection first, then rebuild both views whatever its outcome
    pub async fn collect_and_refresh<T, R>(&self, trigger: &T, sink: &mut R) -> Result<DashboardView>
    where
        T: CollectionTrigger,
        R: RenderSink,
    {
        info!("Triggering a new collection run");
        if let Err(e) = trigger.trigger_collection().await {
            error!("Collection run failed: {}", e);
        }
        self.refresh(sink).await
    }
}

pub fn render_view<R: RenderSink>(view: &DashboardView, sink: &mut R) -> Result<()> {
    sink.render_snapshot(&view.display_rows, view.table.last_updated.as_deref())?;
    sink.render_trends(&view.table)
}

fn isolate_failure<T>(result: Result<Vec<T>, SourceError>, what: &str) -> (Vec<T>, Option<SourceError>) {
    match result {
        Ok(items) => (items, None),
        Err(e) => {
            error!("{}: {}", what, e);
            (Vec::new(), Some(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ObservationRecord, SnapshotRow};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn broken(url: &str) -> SourceError {
        SourceError::NotASequence {
            url: url.to_string(),
            found: "an object",
        }
    }

    struct FakeSnapshot(Option<Vec<SnapshotRow>>);

    impl SnapshotSource for FakeSnapshot {
        async fn fetch_snapshot(&self) -> Result<Vec<SnapshotRow>, SourceError> {
            self.0.clone().ok_or_else(|| broken("/api/data"))
        }
    }

    struct FakeHistory(Option<Vec<ObservationRecord>>);

    impl HistorySource for FakeHistory {
        async fn fetch_history(&self) -> Result<Vec<ObservationRecord>, SourceError> {
            self.0.clone().ok_or_else(|| broken("/api/analysis"))
        }
    }

    struct CountingTrigger {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CollectionTrigger for CountingTrigger {
        async fn trigger_collection(&self) -> Result<(), SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail { Err(broken("/api/crawl")) } else { Ok(()) }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        snapshots: Vec<(usize, Option<String>)>,
        trend_rows: Vec<usize>,
    }

    impl RenderSink for RecordingSink {
        fn render_snapshot(&mut self, rows: &[DisplayRow], last_updated: Option<&str>) -> Result<()> {
            self.snapshots.push((rows.len(), last_updated.map(str::to_string)));
            Ok(())
        }

        fn render_trends(&mut self, table: &SeriesTable) -> Result<()> {
            self.trend_rows.push(table.rows.len());
            Ok(())
        }
    }

    fn snapshot() -> Vec<SnapshotRow> {
        vec![SnapshotRow {
            title: "Wicked".to_string(),
            raw_rating: Some("PG".to_string()),
            ..Default::default()
        }]
    }

    fn history() -> Vec<ObservationRecord> {
        vec![
            ObservationRecord::new("Wicked", "20240101_120000").with_score(7.6),
            ObservationRecord::new("Wicked", "20240102_120000").with_score(7.7),
        ]
    }

    #[tokio::test]
    async fn test_both_views_built() {
        let service = DashboardService::new(
            FakeSnapshot(Some(snapshot())),
            FakeHistory(Some(history())),
            RatingNormalizer::new(),
        );
        let mut sink = RecordingSink::default();

        let view = service.refresh(&mut sink).await.unwrap();

        assert_eq!(view.display_rows.len(), 1);
        assert_eq!(view.table.rows.len(), 2);
        assert!(view.snapshot_error.is_none() && view.history_error.is_none());
        assert_eq!(sink.snapshots, [(1, Some("2 Jan 2024, 12:00".to_string()))]);
        assert_eq!(sink.trend_rows, [2]);
    }

    #[tokio::test]
    async fn test_history_failure_leaves_snapshot_intact() {
        let service = DashboardService::new(
            FakeSnapshot(Some(snapshot())),
            FakeHistory(None),
            RatingNormalizer::new(),
        );

        let view = service.load().await;

        assert_eq!(view.display_rows.len(), 1);
        assert!(view.table.is_empty());
        assert_eq!(view.table.last_updated, None);
        assert!(matches!(view.history_error, Some(SourceError::NotASequence { .. })));
        assert!(view.snapshot_error.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_failure_leaves_trends_intact() {
        let service = DashboardService::new(
            FakeSnapshot(None),
            FakeHistory(Some(history())),
            RatingNormalizer::new(),
        );

        let view = service.load().await;

        assert!(view.display_rows.is_empty());
        assert!(view.snapshot_error.is_some());
        assert_eq!(view.table.titles, ["Wicked"]);
    }

    #[tokio::test]
    async fn test_failed_collection_still_refreshes() {
        let service = DashboardService::new(
            FakeSnapshot(Some(snapshot())),
            FakeHistory(Some(history())),
            RatingNormalizer::new(),
        );
        let trigger = CountingTrigger {
            calls: AtomicUsize::new(0),
            fail: true,
        };
        let mut sink = RecordingSink::default();

        service.collect_and_refresh(&trigger, &mut sink).await.unwrap();

        assert_eq!(trigger.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.snapshots.len(), 1);
        assert_eq!(sink.trend_rows.len(), 1);
    }
}

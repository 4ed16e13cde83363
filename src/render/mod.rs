pub mod terminal;

use anyhow::Result;

use crate::domain::{DisplayRow, SeriesTable};

pub use terminal::TerminalRenderer;

pub const NO_DATA: &str = "No data available";

/// Receives the transformed views. Empty inputs must be shown as an explicit
/// "no data" state, not as an empty chart or table.
pub trait RenderSink {
    fn render_snapshot(&mut self, rows: &[DisplayRow], last_updated: Option<&str>) -> Result<()>;

    fn render_trends(&mut self, table: &SeriesTable) -> Result<()>;
}

//! The `OutputWriter` trait implemented by all backend writers.

use crate::{BuildingStateRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write a batch of per-building rows, all for the same tick.
    fn write_building_states(&mut self, rows: &[BuildingStateRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.  Writes after `finish` fail with `OutputError::Finished`.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        (**self).write_tick_summary(row)
    }

    fn write_building_states(&mut self, rows: &[BuildingStateRow]) -> OutputResult<()> {
        (**self).write_building_states(rows)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

//! `SnapshotRecorder<W>`: bridges `SimObserver` to an `OutputWriter`.

use umb_core::Tick;
use umb_sim::{EmitError, SimObserver, TickSnapshot};

use crate::row::{BuildingStateRow, TickSummaryRow};
use crate::writer::OutputWriter;

/// A [`SimObserver`] that writes a summary row for every tick and
/// per-building rows every `building_interval` ticks to any
/// [`OutputWriter`] backend.
///
/// Writer errors are returned to the simulation, which aborts the run.
pub struct SnapshotRecorder<W: OutputWriter> {
    writer:            W,
    building_interval: u64,
    summaries_written: u64,
}

impl<W: OutputWriter> SnapshotRecorder<W> {
    /// `building_interval == 0` disables per-building rows.  Otherwise they
    /// are written on every tick divisible by the interval, tick 0 included.
    pub fn new(writer: W, building_interval: u64) -> Self {
        Self { writer, building_interval, summaries_written: 0 }
    }

    pub fn summaries_written(&self) -> u64 {
        self.summaries_written
    }

    fn records_buildings(&self, tick: Tick) -> bool {
        self.building_interval != 0 && tick.0 % self.building_interval == 0
    }
}

impl<W: OutputWriter> SimObserver for SnapshotRecorder<W> {
    fn on_snapshot(&mut self, snapshot: &TickSnapshot<'_>) -> Result<(), EmitError> {
        self.writer.write_tick_summary(&TickSummaryRow::from_snapshot(snapshot))?;
        self.summaries_written += 1;

        if self.records_buildings(snapshot.tick) {
            self.writer.write_building_states(&BuildingStateRow::collect(snapshot))?;
        }
        Ok(())
    }

    fn on_sim_end(&mut self, final_tick: Tick) -> Result<(), EmitError> {
        self.writer.finish()?;
        log::info!("output finished at {final_tick}: {} summary rows", self.summaries_written);
        Ok(())
    }
}

//! Console reporting.

use std::io::Write;

use umb_core::Tick;
use umb_output::{OutputWriter, SnapshotRecorder};
use umb_sim::{EmitError, SimObserver, TickSnapshot, TickStats};

/// Prints each tick's counters to `out` and forwards the snapshot to an
/// optional file recorder.
pub struct ConsoleObserver<O: Write> {
    out:      O,
    quiet:    bool,
    recorder: Option<SnapshotRecorder<Box<dyn OutputWriter>>>,
    /// Counters summed over every movement tick.
    pub totals: TickStats,
    pub ticks:  u64,
}

impl<O: Write> ConsoleObserver<O> {
    pub fn new(out: O, quiet: bool, recorder: Option<SnapshotRecorder<Box<dyn OutputWriter>>>) -> Self {
        Self { out, quiet, recorder, totals: TickStats::default(), ticks: 0 }
    }

    fn print_tick(&mut self, snap: &TickSnapshot<'_>) -> std::io::Result<()> {
        let weather = snap.weather.map_or("-", |w| w.as_str());
        writeln!(self.out, "----------------- {} {weather}", snap.tick)?;
        writeln!(self.out, "Total people  = {}", snap.total_population)?;
        writeln!(self.out, "Transfers     = {}", snap.stats.transfer_count)?;
        writeln!(self.out, "Starves       = {}", snap.stats.starve_count)?;
        writeln!(self.out, "Lost umbrella = {}", snap.stats.lose_umbrella_count)?;
        Ok(())
    }
}

impl<O: Write> SimObserver for ConsoleObserver<O> {
    fn on_snapshot(&mut self, snapshot: &TickSnapshot<'_>) -> Result<(), EmitError> {
        if snapshot.tick != Tick::ZERO {
            self.totals += snapshot.stats;
            self.ticks += 1;
        }
        if !self.quiet {
            self.print_tick(snapshot)?;
        }
        if let Some(recorder) = &mut self.recorder {
            recorder.on_snapshot(snapshot)?;
        }
        Ok(())
    }

    fn on_sim_end(&mut self, final_tick: Tick) -> Result<(), EmitError> {
        if let Some(recorder) = &mut self.recorder {
            recorder.on_sim_end(final_tick)?;
        }
        writeln!(self.out, "=================")?;
        writeln!(self.out, "Ticks run           = {}", self.ticks)?;
        writeln!(self.out, "Total transfers     = {}", self.totals.transfer_count)?;
        writeln!(self.out, "Total starves       = {}", self.totals.starve_count)?;
        writeln!(self.out, "Total lost umbrella = {}", self.totals.lose_umbrella_count)?;
        self.out.flush()?;
        Ok(())
    }
}

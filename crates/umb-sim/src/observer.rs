//! The emitter capability the tick scheduler reports to.

use umb_core::Tick;

use crate::TickSnapshot;

/// Error type observers return.  Any error aborts the run.
pub type EmitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Callbacks invoked synchronously by [`Sim::run`][crate::Sim::run].
///
/// Both methods have no-op defaults.  Returning `Err` aborts the run with
/// [`SimError::Emit`][crate::SimError::Emit]; the simulation does not retry.
///
/// # Example: console printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_snapshot(&mut self, snap: &TickSnapshot<'_>) -> Result<(), EmitError> {
///         println!("{}: {} transfers", snap.tick, snap.stats.transfer_count);
///         Ok(())
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once for tick 0 and once after every movement tick.
    fn on_snapshot(&mut self, _snapshot: &TickSnapshot<'_>) -> Result<(), EmitError> {
        Ok(())
    }

    /// Called once after the final tick's snapshot.
    fn on_sim_end(&mut self, _final_tick: Tick) -> Result<(), EmitError> {
        Ok(())
    }
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Adapts a closure into a [`SimObserver`].
pub struct FnObserver<F>(pub F);

impl<F> SimObserver for FnObserver<F>
where
    F: FnMut(&TickSnapshot<'_>) -> Result<(), EmitError>,
{
    fn on_snapshot(&mut self, snapshot: &TickSnapshot<'_>) -> Result<(), EmitError> {
        (self.0)(snapshot)
    }
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_snapshot(&mut self, snapshot: &TickSnapshot<'_>) -> Result<(), EmitError> {
        (**self).on_snapshot(snapshot)
    }

    fn on_sim_end(&mut self, final_tick: Tick) -> Result<(), EmitError> {
        (**self).on_sim_end(final_tick)
    }
}

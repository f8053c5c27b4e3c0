//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  Tick 0 is the initial
//! state (no movement); ticks `1..=simulation_length` each run one movement
//! round.  Transition weights repeat with the move-rule period `R`, and the
//! active slice for tick `t` is `t mod R`.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Index of the active move-rule slice for this tick.
    ///
    /// # Panics
    /// Panics if `period == 0`; callers validate the period at build time.
    #[inline]
    pub fn period_index(self, period: usize) -> usize {
        (self.0 % period as u64) as usize
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick of a run against its configured length.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Number of movement ticks in the run (tick 0 is not counted).
    pub simulation_length: u64,
    /// The last tick whose snapshot has been emitted.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(simulation_length: u64) -> Self {
        Self {
            simulation_length,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick and return the new tick.
    #[inline]
    pub fn advance(&mut self) -> Tick {
        self.current_tick = self.current_tick.offset(1);
        self.current_tick
    }

    /// `true` once the final tick has been processed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_tick.0 >= self.simulation_length
    }

    /// Movement ticks still to run.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.simulation_length.saturating_sub(self.current_tick.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.current_tick, self.simulation_length)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration: how long, which seed, how many workers.
///
/// The model data itself (kinds, weights, population) lives in
/// `umb_model::SimInput`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of movement ticks `T`.  The run emits `T + 1` snapshots.
    pub simulation_length: u64,

    /// Master RNG seed.  The same seed always produces identical results,
    /// independent of `num_workers`.
    pub seed: u64,

    /// Worker count for the scatter/gather phases.  `None` uses Rayon's
    /// default (all logical cores).
    #[cfg_attr(feature = "serde", serde(default))]
    pub num_workers: Option<usize>,
}

impl SimConfig {
    /// The last tick of the run (inclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.simulation_length)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.simulation_length)
    }
}

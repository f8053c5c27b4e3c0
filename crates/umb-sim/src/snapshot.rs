//! Per-tick statistics and the snapshot handed to observers.

use std::ops::AddAssign;

use umb_core::{Tick, Weather};
use umb_model::Building;

/// Counters for one tick.  Also used as each worker's private tally.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Agents that changed building this tick.
    pub transfer_count:      u64,
    /// Agents whose move was blocked by an empty umbrella pool in the rain.
    pub starve_count:        u64,
    /// Blocked agents that already held an umbrella when evaluated.
    pub lose_umbrella_count: u64,
    /// Residents evaluated for movement.  Equals the total population on
    /// every movement tick and 0 on tick 0.
    pub evaluated_count:     u64,
}

impl AddAssign for TickStats {
    fn add_assign(&mut self, rhs: Self) {
        self.transfer_count      += rhs.transfer_count;
        self.starve_count        += rhs.starve_count;
        self.lose_umbrella_count += rhs.lose_umbrella_count;
        self.evaluated_count     += rhs.evaluated_count;
    }
}

/// Read-only view of the world after one tick.
///
/// Borrows the building list for the duration of the observer callback;
/// call [`to_owned`](Self::to_owned) to keep a copy.
#[derive(Copy, Clone, Debug)]
pub struct TickSnapshot<'a> {
    pub tick:             Tick,
    /// `None` on tick 0, which has no movement round.
    pub weather:          Option<Weather>,
    pub total_population: u64,
    pub stats:            TickStats,
    /// All buildings, indexed by `BuildingId`.
    pub buildings:        &'a [Building],
}

impl TickSnapshot<'_> {
    /// Residents across all buildings, counted from the building lists.
    pub fn resident_total(&self) -> u64 {
        self.buildings.iter().map(|b| b.population() as u64).sum()
    }

    /// Umbrellas across all building pools.
    pub fn umbrella_total(&self) -> u64 {
        self.buildings.iter().map(|b| b.umbrella_count).sum()
    }

    pub fn to_owned(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            tick:             self.tick,
            weather:          self.weather,
            total_population: self.total_population,
            stats:            self.stats,
            buildings:        self.buildings.to_vec(),
        }
    }
}

/// An owned copy of a [`TickSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedSnapshot {
    pub tick:             Tick,
    pub weather:          Option<Weather>,
    pub total_population: u64,
    pub stats:            TickStats,
    pub buildings:        Vec<Building>,
}

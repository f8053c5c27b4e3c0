//! Plain data row types written by output backends.

use umb_core::Weather;
use umb_sim::TickSnapshot;

/// Summary statistics for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    /// `None` on tick 0.
    pub weather:        Option<Weather>,
    pub population:     u64,
    /// Umbrellas across all building pools.
    pub umbrellas:      u64,
    pub transfers:      u64,
    pub starves:        u64,
    pub lost_umbrellas: u64,
}

impl TickSummaryRow {
    pub fn from_snapshot(snap: &TickSnapshot<'_>) -> Self {
        Self {
            tick:           snap.tick.0,
            weather:        snap.weather,
            population:     snap.total_population,
            umbrellas:      snap.umbrella_total(),
            transfers:      snap.stats.transfer_count,
            starves:        snap.stats.starve_count,
            lost_umbrellas: snap.stats.lose_umbrella_count,
        }
    }

    /// Weather column text; empty on tick 0.
    pub fn weather_str(&self) -> &'static str {
        self.weather.map_or("", Weather::as_str)
    }
}

/// One building's state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingStateRow {
    pub tick:      u64,
    pub building:  u32,
    pub residents: u64,
    pub umbrellas: u64,
    /// Residents whose last move was made in the rain.
    pub carrying:  u64,
}

impl BuildingStateRow {
    /// One row per building, in building order.
    pub fn collect(snap: &TickSnapshot<'_>) -> Vec<Self> {
        snap.buildings
            .iter()
            .enumerate()
            .map(|(i, b)| Self {
                tick:      snap.tick.0,
                building:  i as u32,
                residents: b.population() as u64,
                umbrellas: b.umbrella_count,
                carrying:  b.carrying_count() as u64,
            })
            .collect()
    }
}

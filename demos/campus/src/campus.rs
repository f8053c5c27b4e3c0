//! Synthetic campus generator.
//!
//! The first third of the buildings (at least one) are dormitories where
//! every resident starts; the rest are lecture halls.  The move-rule period
//! is one day: during the daytime slots agents drift toward the halls, at
//! night back toward the dorms.  Every row keeps a positive self-weight so
//! no distribution is degenerate.

use serde::Deserialize;
use umb_core::SimRng;
use umb_model::{ModelResult, SimInput};

/// Extra weight toward the buildings the time of day favors.
const PULL: f64 = 3.0;
/// Weight of staying put.
const STAY: f64 = 4.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CampusConfig {
    pub buildings:              usize,
    pub kinds:                  usize,
    /// Slots per day.
    pub period:                 usize,
    /// Initial head count of each dormitory, split evenly across kinds.
    pub residents_per_building: u64,
    /// Per-kind carry rates; defaults to an even spread over `[0.2, 0.8]`.
    pub carry_rates:            Option<Vec<f64>>,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            buildings:              12,
            kinds:                  3,
            period:                 24,
            residents_per_building: 150,
            carry_rates:            None,
        }
    }
}

impl CampusConfig {
    pub fn dorm_count(&self) -> usize {
        (self.buildings / 3).max(1).min(self.buildings)
    }

    fn is_daytime(&self, slot: usize) -> bool {
        let hour = slot * 24 / self.period.max(1);
        (8..18).contains(&hour)
    }
}

/// Build a validated-shape [`SimInput`] for `campus`.  Weight jitter is
/// drawn from `seed`, so the same seed gives the same campus.
pub fn generate(campus: &CampusConfig, seed: u64) -> ModelResult<SimInput> {
    let (k, b, r) = (campus.kinds, campus.buildings, campus.period);
    let dorms = campus.dorm_count();
    let mut rng = SimRng::new(seed).child(0xCA3B);

    let mut input = SimInput::new(k, b, r);
    input.carry_rates = match &campus.carry_rates {
        Some(rates) => rates.clone(),
        None => (0..k)
            .map(|kind| if k == 1 { 0.5 } else { 0.2 + 0.6 * kind as f64 / (k - 1) as f64 })
            .collect(),
    };

    for kind in 0..k {
        for slot in 0..r {
            let daytime = campus.is_daytime(slot);
            for source in 0..b {
                for dest in 0..b {
                    let is_dorm = dest < dorms;
                    let mut w: f64 = rng.gen_range(0.0..1.0);
                    if dest == source {
                        w += STAY;
                    }
                    if daytime != is_dorm {
                        w += PULL;
                    }
                    input.weights.set(kind, slot, source, dest, w)?;
                }
            }
        }
    }

    let per_kind = campus.residents_per_building / k.max(1) as u64;
    let remainder = campus.residents_per_building - per_kind * k.max(1) as u64;
    for building in input.population.iter_mut().take(dorms) {
        for (kind, count) in building.iter_mut().enumerate() {
            *count = per_kind + if kind == 0 { remainder } else { 0 };
        }
    }

    log::info!(
        "generated campus: {dorms} dorms, {} halls, {k} kinds, {} agents",
        b - dorms,
        input.total_population()
    );
    Ok(input)
}

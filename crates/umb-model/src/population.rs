//! Agents, buildings, and the one-shot population initializer.

use log::info;
use umb_core::KindId;

use crate::{ModelResult, SimInput};

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One individual.  Owned by exactly one building's resident list at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    pub kind:             KindId,
    /// Whether the agent left its last building under an umbrella.
    pub carries_umbrella: bool,
}

impl Agent {
    pub fn new(kind: KindId) -> Self {
        Self { kind, carries_umbrella: false }
    }
}

// ── Building ──────────────────────────────────────────────────────────────────

/// A building: a shared umbrella pool and an unordered resident list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Building {
    pub umbrella_count: u64,
    pub residents:      Vec<Agent>,
}

impl Building {
    #[inline]
    pub fn population(&self) -> usize {
        self.residents.len()
    }

    /// Residents of `kind`.
    pub fn count_kind(&self, kind: KindId) -> usize {
        self.residents.iter().filter(|a| a.kind == kind).count()
    }

    /// Residents whose personal flag says they hold an umbrella.
    pub fn carrying_count(&self) -> usize {
        self.residents.iter().filter(|a| a.carries_umbrella).count()
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// Initial buildings plus the run-invariant total head count.
#[derive(Clone, Debug)]
pub struct Population {
    pub buildings: Vec<Building>,
    pub total:     u64,
}

impl Population {
    /// Materialize `population[b][k]` agents of kind `k` into building `b`
    /// and seed each building's umbrella pool from the expected carry rate.
    ///
    /// Every agent starts with `carries_umbrella = false`; the initial stock
    /// is an aggregate estimate per building, not tied to individual agents.
    ///
    /// # Errors
    ///
    /// Whatever [`SimInput::validate`] reports.
    pub fn initialize(input: &SimInput) -> ModelResult<Self> {
        input.validate()?;

        let buildings: Vec<Building> = input
            .population
            .iter()
            .map(|counts| {
                // `validate` bounds every per-building sum by `usize::MAX`.
                let residents_len = counts.iter().sum::<u64>() as usize;
                let mut residents = Vec::with_capacity(residents_len);
                for (k, &count) in counts.iter().enumerate() {
                    let agent = Agent::new(KindId(k as u16));
                    residents.extend(std::iter::repeat_n(agent, count as usize));
                }
                Building {
                    umbrella_count: seed_umbrellas(counts, &input.carry_rates),
                    residents,
                }
            })
            .collect();

        let total = input.total_population();
        let umbrellas: u64 = buildings.iter().map(|b| b.umbrella_count).sum();
        info!(
            "initialized {} buildings: {total} agents, {umbrellas} umbrellas",
            buildings.len()
        );

        Ok(Self { buildings, total })
    }
}

/// Expected umbrella endowment for one building: `Σ_k floor(count[k] * rate[k])`.
pub fn seed_umbrellas(counts: &[u64], carry_rates: &[f64]) -> u64 {
    counts
        .iter()
        .zip(carry_rates)
        .map(|(&count, &rate)| (count as f64 * rate).floor() as u64)
        .sum()
}

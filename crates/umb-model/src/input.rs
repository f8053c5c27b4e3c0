//! `SimInput`: the model half of the configuration surface.
//!
//! Constructed by the host (by hand, from CSV via [`crate::loader`], or from
//! a synthetic generator) and validated once before anything is built.

use umb_core::{BuildingId, KindId};

use crate::transition::check_capacity;
use crate::{ModelError, ModelResult, TransitionModel, TransitionWeights};

/// Kinds, buildings, movement weights, and the initial head counts.
#[derive(Clone, Debug)]
pub struct SimInput {
    /// Number of agent kinds `K`.
    pub kind_count:       usize,
    /// Per-kind fraction of agents expected to carry an umbrella, `[K]`.
    pub carry_rates:      Vec<f64>,
    /// Number of buildings `B`.
    pub building_count:   usize,
    /// Move-rule period `R`.
    pub move_rule_period: usize,
    /// Raw weights `[K][R][B][B]`.
    pub weights:          TransitionWeights,
    /// Initial head counts `[B][K]`.
    pub population:       Vec<Vec<u64>>,
}

impl SimInput {
    /// Allocate an input of the given dimensions with zero weights, zero
    /// carry rates, and an empty population, ready to be filled in.
    pub fn new(kind_count: usize, building_count: usize, move_rule_period: usize) -> Self {
        Self {
            kind_count,
            carry_rates: vec![0.0; kind_count],
            building_count,
            move_rule_period,
            weights: TransitionWeights::zeros(kind_count, move_rule_period, building_count),
            population: vec![vec![0; kind_count]; building_count],
        }
    }

    /// Check dimensions, ranges, and id capacity.
    ///
    /// Does not check row sums; that is [`TransitionModel::build`]'s job.
    pub fn validate(&self) -> ModelResult<()> {
        if self.kind_count == 0 {
            return Err(ModelError::Config("kind count must be at least 1".into()));
        }
        if self.building_count == 0 {
            return Err(ModelError::Config("building count must be at least 1".into()));
        }
        if self.move_rule_period == 0 {
            return Err(ModelError::Config("move-rule period must be at least 1".into()));
        }
        check_capacity("kind", self.kind_count, KindId::CAPACITY)?;
        check_capacity("building", self.building_count, BuildingId::CAPACITY)?;

        if self.carry_rates.len() != self.kind_count {
            return Err(ModelError::Config(format!(
                "expected {} carry rates, got {}",
                self.kind_count,
                self.carry_rates.len()
            )));
        }
        for (k, &rate) in self.carry_rates.iter().enumerate() {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ModelError::Config(format!(
                    "carry rate of kind {k} must be in [0, 1], got {rate}"
                )));
            }
        }

        let expected = (self.kind_count, self.move_rule_period, self.building_count);
        if self.weights.shape() != expected {
            return Err(ModelError::Config(format!(
                "weights have shape {:?}, expected (kinds, period, buildings) = {expected:?}",
                self.weights.shape()
            )));
        }

        if self.population.len() != self.building_count {
            return Err(ModelError::Config(format!(
                "population has {} building rows, expected {}",
                self.population.len(),
                self.building_count
            )));
        }
        if let Some((b, row)) = self
            .population
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.kind_count)
        {
            return Err(ModelError::Config(format!(
                "population row for building {b} has {} kinds, expected {}",
                row.len(),
                self.kind_count
            )));
        }

        // Each building's residents must fit one list, and the run total a u64.
        let mut total: u128 = 0;
        for row in &self.population {
            let residents: u128 = row.iter().map(|&c| u128::from(c)).sum();
            if residents > usize::MAX as u128 {
                return Err(ModelError::CapacityExceeded {
                    what: "building resident",
                    got:  residents,
                    max:  usize::MAX as u128,
                });
            }
            total += residents;
        }
        if total > u128::from(u64::MAX) {
            return Err(ModelError::CapacityExceeded {
                what: "population",
                got:  total,
                max:  u128::from(u64::MAX),
            });
        }
        Ok(())
    }

    /// Validate and build the cumulative transition model.
    pub fn build_model(&self) -> ModelResult<TransitionModel> {
        self.validate()?;
        TransitionModel::build(&self.weights)
    }

    /// Sum of the initial population matrix, saturating at `u64::MAX`
    /// (which [`validate`](Self::validate) rejects).
    pub fn total_population(&self) -> u64 {
        self.population
            .iter()
            .flatten()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
    }
}

//! Movement weights and the cumulative transition model built from them.
//!
//! # Layout
//!
//! Both tensors are stored flat, row-major over
//! `(kind, period, source, destination)`:
//!
//! ```text
//! offset(k, p, s) = ((k * R + p) * B + s) * B
//! row(k, p, s)    = data[offset .. offset + B]
//! ```
//!
//! One contiguous `B`-length row per `(kind, period, source)` keeps the
//! sampling scan cache-friendly and avoids any nested allocation.

use umb_core::{BuildingId, KindId};

use crate::{ModelError, ModelResult};

// ── Shape ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Shape {
    kinds:     usize,
    period:    usize,
    buildings: usize,
}

impl Shape {
    #[inline]
    fn row_offset(&self, kind: usize, period: usize, source: usize) -> usize {
        ((kind * self.period + period) * self.buildings + source) * self.buildings
    }

    #[inline]
    fn rows(&self) -> usize {
        self.kinds * self.period * self.buildings
    }

    fn len(&self) -> usize {
        self.rows() * self.buildings
    }

    fn check(&self, kind: usize, period: usize, source: usize, dest: usize) -> ModelResult<()> {
        if kind >= self.kinds || period >= self.period || source >= self.buildings || dest >= self.buildings {
            return Err(ModelError::Config(format!(
                "weight index ({kind}, {period}, {source}, {dest}) outside shape \
                 [{}][{}][{}][{}]",
                self.kinds, self.period, self.buildings, self.buildings
            )));
        }
        Ok(())
    }
}

// ── TransitionWeights ─────────────────────────────────────────────────────────

/// Raw, non-negative movement weights `w[kind][period][source][destination]`.
///
/// Rows need not sum to 1; [`TransitionModel::build`] normalizes them.
/// Every stored entry is finite and `>= 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionWeights {
    shape: Shape,
    data:  Vec<f64>,
}

impl TransitionWeights {
    /// All-zero weights of shape `[kinds][period][buildings][buildings]`.
    pub fn zeros(kinds: usize, period: usize, buildings: usize) -> Self {
        let shape = Shape { kinds, period, buildings };
        Self { shape, data: vec![0.0; shape.len()] }
    }

    /// Build from a nested `[K][R][B][B]` array.
    ///
    /// # Errors
    ///
    /// `ModelError::Config` if the array is ragged or holds a negative or
    /// non-finite weight.
    pub fn from_nested(nested: &[Vec<Vec<Vec<f64>>>]) -> ModelResult<Self> {
        let kinds = nested.len();
        let period = nested.first().map_or(0, Vec::len);
        let buildings = nested
            .first()
            .and_then(|k| k.first())
            .map_or(0, Vec::len);

        let mut weights = Self::zeros(kinds, period, buildings);
        for (k, per_kind) in nested.iter().enumerate() {
            if per_kind.len() != period {
                return Err(ModelError::Config(format!(
                    "kind {k} has {} periods, expected {period}", per_kind.len()
                )));
            }
            for (p, matrix) in per_kind.iter().enumerate() {
                if matrix.len() != buildings {
                    return Err(ModelError::Config(format!(
                        "kind {k} period {p} has {} source rows, expected {buildings}", matrix.len()
                    )));
                }
                for (s, row) in matrix.iter().enumerate() {
                    if row.len() != buildings {
                        return Err(ModelError::Config(format!(
                            "kind {k} period {p} source {s} has {} destinations, expected {buildings}",
                            row.len()
                        )));
                    }
                    for (d, &w) in row.iter().enumerate() {
                        weights.set(k, p, s, d, w)?;
                    }
                }
            }
        }
        Ok(weights)
    }

    /// Set one weight.
    ///
    /// # Errors
    ///
    /// `ModelError::Config` if the index is out of shape or `weight` is
    /// negative or non-finite.
    pub fn set(
        &mut self,
        kind:   usize,
        period: usize,
        source: usize,
        dest:   usize,
        weight: f64,
    ) -> ModelResult<()> {
        self.shape.check(kind, period, source, dest)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(ModelError::Config(format!(
                "weight ({kind}, {period}, {source}, {dest}) must be finite and non-negative, got {weight}"
            )));
        }
        let i = self.shape.row_offset(kind, period, source) + dest;
        self.data[i] = weight;
        Ok(())
    }

    /// Set the same destination row for every period of `kind`.
    pub fn set_row_all_periods(
        &mut self,
        kind:   usize,
        source: usize,
        row:    &[f64],
    ) -> ModelResult<()> {
        for p in 0..self.shape.period {
            for (d, &w) in row.iter().enumerate() {
                self.set(kind, p, source, d, w)?;
            }
        }
        Ok(())
    }

    pub fn get(&self, kind: usize, period: usize, source: usize, dest: usize) -> f64 {
        self.data[self.shape.row_offset(kind, period, source) + dest]
    }

    /// `(kinds, period, buildings)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.shape.kinds, self.shape.period, self.shape.buildings)
    }

    fn row(&self, kind: usize, period: usize, source: usize) -> &[f64] {
        let start = self.shape.row_offset(kind, period, source);
        &self.data[start..start + self.shape.buildings]
    }
}

// ── TransitionModel ───────────────────────────────────────────────────────────

/// Per-row cumulative distribution over destination buildings.
///
/// Every row is non-decreasing and its last entry is exactly `1.0`, so
/// [`sample`](Self::sample) always finds a destination.  The model is
/// read-only once built and is shared by all workers.
#[derive(Clone, Debug)]
pub struct TransitionModel {
    shape: Shape,
    cdf:   Vec<f64>,
}

impl TransitionModel {
    /// Normalize every row of `weights` and convert it to a prefix sum.
    ///
    /// # Errors
    ///
    /// - `ModelError::Config` if any dimension is zero.
    /// - `ModelError::CapacityExceeded` if the kind or building count does
    ///   not fit the id types.
    /// - `ModelError::DegenerateDistribution` for the first row whose weights
    ///   sum to zero.
    pub fn build(weights: &TransitionWeights) -> ModelResult<Self> {
        let shape = weights.shape;
        if shape.kinds == 0 || shape.period == 0 || shape.buildings == 0 {
            return Err(ModelError::Config(format!(
                "transition weights must have non-zero shape, got [{}][{}][{}][{}]",
                shape.kinds, shape.period, shape.buildings, shape.buildings
            )));
        }
        check_capacity("kind", shape.kinds, KindId::CAPACITY)?;
        check_capacity("building", shape.buildings, BuildingId::CAPACITY)?;

        let mut cdf = Vec::with_capacity(shape.len());
        for k in 0..shape.kinds {
            for p in 0..shape.period {
                for s in 0..shape.buildings {
                    let row = weights.row(k, p, s);
                    let sum: f64 = row.iter().sum();
                    if sum <= 0.0 {
                        return Err(ModelError::DegenerateDistribution {
                            kind:     KindId(k as u16),
                            period:   p,
                            building: BuildingId(s as u32),
                        });
                    }

                    let mut acc = 0.0;
                    for &w in row {
                        acc += w / sum;
                        cdf.push(acc.min(1.0));
                    }
                    // Pin the tail so rounding can never leave u > cdf[B-1].
                    if let Some(last) = cdf.last_mut() {
                        *last = 1.0;
                    }
                }
            }
        }

        Ok(Self { shape, cdf })
    }

    /// The CDF row for `(kind, period, source)`.
    #[inline]
    pub fn row(&self, kind: KindId, period: usize, source: BuildingId) -> &[f64] {
        let start = self.shape.row_offset(kind.index(), period, source.index());
        &self.cdf[start..start + self.shape.buildings]
    }

    /// Smallest destination `d` with `u <= cdf[d]`.
    ///
    /// `u` is expected in `[0, 1)`.
    #[inline]
    pub fn sample(&self, kind: KindId, period: usize, source: BuildingId, u: f64) -> BuildingId {
        let row = self.row(kind, period, source);
        let d = row.partition_point(|&c| c < u).min(row.len() - 1);
        BuildingId(d as u32)
    }

    pub fn kind_count(&self) -> usize {
        self.shape.kinds
    }

    pub fn period(&self) -> usize {
        self.shape.period
    }

    pub fn building_count(&self) -> usize {
        self.shape.buildings
    }
}

pub(crate) fn check_capacity(what: &'static str, got: usize, max: usize) -> ModelResult<()> {
    if got > max {
        return Err(ModelError::CapacityExceeded { what, got: got as u128, max: max as u128 });
    }
    Ok(())
}

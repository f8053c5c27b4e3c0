//! Deterministic per-stream and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each building owns an independent `SmallRng` stream seeded by:
//!
//!   seed = global_seed XOR (stream_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive indices uniformly across the seed space.
//! Because every stream is owned by exactly one building, and every building
//! is scanned by exactly one worker per tick:
//!
//! - Workers never share generator state (no contention, no data race).
//! - The sequence of draws a building sees does not depend on how buildings
//!   are partitioned across workers, so results are identical for any
//!   worker count.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Mix a global seed with a stream index.
#[inline]
pub fn mix_seed(global_seed: u64, index: u64) -> u64 {
    global_seed ^ index.wrapping_add(1).wrapping_mul(MIXING_CONSTANT)
}

// ── StreamRng ─────────────────────────────────────────────────────────────────

/// One independent random stream, owned by a single building.
///
/// `StreamRng` is `Send` but must never be shared between concurrently
/// running workers; the simulation hands each worker `&mut` access to the
/// streams of the buildings it owns for the current phase.
#[derive(Clone, Debug)]
pub struct StreamRng(SmallRng);

impl StreamRng {
    /// Seed deterministically from the run's global seed and a stream index.
    pub fn new(global_seed: u64, index: u64) -> Self {
        StreamRng(SmallRng::seed_from_u64(mix_seed(global_seed, index)))
    }

    /// Uniform variate in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for single-threaded work (weather generation,
/// synthetic scenario construction).
///
/// If you need parallel randomness, derive one child per worker.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

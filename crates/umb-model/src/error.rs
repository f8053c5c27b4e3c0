use thiserror::Error;
use umb_core::{BuildingId, CoreError, KindId};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model configuration error: {0}")]
    Config(String),

    #[error("transition row for {kind}, period {period}, {building} has zero total weight")]
    DegenerateDistribution {
        kind:     KindId,
        period:   usize,
        building: BuildingId,
    },

    /// Counts are widened to `u128` so overflowing head-count sums are
    /// reported exactly.
    #[error("{what} count {got} exceeds capacity {max}")]
    CapacityExceeded {
        what: &'static str,
        got:  u128,
        max:  u128,
    },

    #[error("input parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;

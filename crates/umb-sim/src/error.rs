use thiserror::Error;
use umb_core::{CoreError, Tick};
use umb_model::ModelError;

use crate::EmitError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// `step` was called after the last tick of the run.
    #[error("run already finished at {0}")]
    Finished(Tick),

    #[error("weather oracle failed at {tick}")]
    Weather {
        tick:   Tick,
        #[source]
        source: CoreError,
    },

    #[error("snapshot emitter failed at {tick}")]
    Emit {
        tick:   Tick,
        #[source]
        source: EmitError,
    },

    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;

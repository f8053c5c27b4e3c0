//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`, so `?` works across layer boundaries.

use thiserror::Error;

use crate::Tick;

/// The base error type shared by all `umb-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("weather unavailable at {tick}: {reason}")]
    Weather { tick: Tick, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `umb-core`.
pub type CoreResult<T> = Result<T, CoreError>;

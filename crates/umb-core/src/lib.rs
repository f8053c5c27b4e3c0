//! `umb-core`: foundational types for the umbrella simulation.
//!
//! This crate is a dependency of every other `umb-*` crate.  It has no
//! `umb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `BuildingId`, `KindId`                                |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `StreamRng` (per-building), `SimRng` (global)         |
//! | [`weather`]     | `Weather`, `WeatherOracle` and stock oracles          |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod weather;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{BuildingId, KindId};
pub use rng::{SimRng, StreamRng};
pub use time::{SimClock, SimConfig, Tick};
pub use weather::{ConstantWeather, RainProbability, Weather, WeatherOracle, WeatherSchedule};

//! `umb-model`: everything built once before the first tick.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`input`]       | `SimInput`: the configuration surface and its validation   |
//! | [`transition`]  | `TransitionWeights` (raw tensor), `TransitionModel` (CDFs)  |
//! | [`population`]  | `Agent`, `Building`, `Population::initialize`               |
//! | [`loader`]      | CSV loaders for kinds, weights, population, and weather     |
//! | [`error`]       | `ModelError`, `ModelResult`                                 |
//!
//! Every error in this crate is raised during setup.  Once a
//! `TransitionModel` and `Population` exist, the simulation cannot fail on
//! model data.

pub mod error;
pub mod input;
pub mod loader;
pub mod population;
pub mod transition;

#[cfg(test)]
mod tests;

pub use error::{ModelError, ModelResult};
pub use input::SimInput;
pub use loader::{
    load_input_dir, load_kinds_csv, load_kinds_reader, load_population_csv,
    load_population_reader, load_weather_csv, load_weather_reader, load_weights_csv,
    load_weights_reader,
};
pub use population::{Agent, Building, Population, seed_umbrellas};
pub use transition::{TransitionModel, TransitionWeights};

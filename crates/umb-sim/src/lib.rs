//! `umb-sim`: tick scheduler and parallel movement engine.
//!
//! # Tick loop
//!
//! ```text
//! tick 0: emit the initial snapshot (no movement)
//! for tick in 1..=simulation_length:
//!   ① Weather : query the oracle once: (simulation_length, tick) → rain?
//!   ② Scatter : each worker scans the residents of its own contiguous
//!                chunk of buildings, draws a destination per resident from
//!                the CDF, applies the umbrella rules, and stages movers in
//!                its private per-destination outbox.
//!   ─ join ─     every outbox is complete before any gather starts
//!   ③ Gather  : each destination building appends every worker's outbox
//!                for it (in worker order) and, if raining, credits its
//!                umbrella pool by the arrival head count.
//!   ─ join ─
//!   ④ Reduce  : per-worker counters are summed into `TickStats` and reset.
//!   ⑤ Emit    : the observer receives the tick's `TickSnapshot`.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | *(default)* Runs scatter and gather on a Rayon pool.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use umb_core::{ConstantWeather, SimConfig, Weather};
//! use umb_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, input, ConstantWeather(Weather::Rain)).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod commit;
pub mod error;
pub mod observer;
pub mod resolve;
pub mod sim;
pub mod snapshot;
pub mod workspace;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{EmitError, FnObserver, NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{OwnedSnapshot, TickSnapshot, TickStats};
pub use workspace::{WorkerWorkspace, Workspace};

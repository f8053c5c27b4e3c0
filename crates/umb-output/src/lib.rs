//! `umb-output`: snapshot writers for the umbrella simulation.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                  |
//! |-----------|---------|------------------------------------------------|
//! | *(none)*  | CSV     | `tick_summaries.csv`, `building_states.csv`    |
//! | `sqlite`  | SQLite  | `output.db`                                    |
//!
//! Both implement [`OutputWriter`] and are driven by [`SnapshotRecorder`],
//! which implements `umb_sim::SimObserver`.  A failed write aborts the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use umb_output::{CsvWriter, SnapshotRecorder};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut recorder = SnapshotRecorder::new(writer, 24);
//! sim.run(&mut recorder)?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotRecorder;
pub use row::{BuildingStateRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `building_states.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{BuildingStateRow, OutputError, OutputResult, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    buildings: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (truncating) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "weather", "population", "umbrellas", "transfers", "starves", "lost_umbrellas",
        ])?;

        let mut buildings = Writer::from_path(dir.join("building_states.csv"))?;
        buildings.write_record(["tick", "building", "residents", "umbrellas", "carrying"])?;

        log::debug!("csv output in {}", dir.display());
        Ok(Self { summaries, buildings, finished: false })
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.check_open()?;
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.weather_str().to_owned(),
            row.population.to_string(),
            row.umbrellas.to_string(),
            row.transfers.to_string(),
            row.starves.to_string(),
            row.lost_umbrellas.to_string(),
        ])?;
        Ok(())
    }

    fn write_building_states(&mut self, rows: &[BuildingStateRow]) -> OutputResult<()> {
        self.check_open()?;
        for row in rows {
            self.buildings.write_record(&[
                row.tick.to_string(),
                row.building.to_string(),
                row.residents.to_string(),
                row.umbrellas.to_string(),
                row.carrying.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.buildings.flush()?;
        Ok(())
    }
}

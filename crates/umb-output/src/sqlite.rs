//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `tick_summaries` and `building_states`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{BuildingStateRow, OutputError, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 weather        TEXT,
                 population     INTEGER NOT NULL,
                 umbrellas      INTEGER NOT NULL,
                 transfers      INTEGER NOT NULL,
                 starves        INTEGER NOT NULL,
                 lost_umbrellas INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS building_states (
                 tick      INTEGER NOT NULL,
                 building  INTEGER NOT NULL,
                 residents INTEGER NOT NULL,
                 umbrellas INTEGER NOT NULL,
                 carrying  INTEGER NOT NULL,
                 PRIMARY KEY (tick, building)
             );",
        )?;

        log::debug!("sqlite output at {}", dir.join("output.db").display());
        Ok(Self { conn, finished: false })
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.check_open()?;
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, weather, population, umbrellas, transfers, starves, lost_umbrellas) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick,
                row.weather.map(|w| w.as_str()),
                row.population,
                row.umbrellas,
                row.transfers,
                row.starves,
                row.lost_umbrellas,
            ],
        )?;
        Ok(())
    }

    fn write_building_states(&mut self, rows: &[BuildingStateRow]) -> OutputResult<()> {
        self.check_open()?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO building_states \
                 (tick, building, residents, umbrellas, carrying) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.building,
                    row.residents,
                    row.umbrellas,
                    row.carrying,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

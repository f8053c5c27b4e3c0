//! CSV loaders for the external model inputs.
//!
//! # CSV formats
//!
//! ```csv
//! # kinds.csv: one row per kind, kinds numbered 0..K without gaps
//! kind,carry_rate
//! 0,0.35
//! 1,0.80
//!
//! # weights.csv: sparse; absent cells are 0
//! kind,period,source,destination,weight
//! 0,0,0,0,8
//! 0,0,0,1,2
//!
//! # population.csv: sparse; absent cells are 0
//! building,kind,count
//! 0,0,120
//! 1,1,40
//!
//! # weather.csv: one row per tick, ticks numbered 1..N without gaps
//! tick,weather
//! 1,cloudy
//! 2,rain
//! ```
//!
//! Repeated `(kind, period, source, destination)` or `(building, kind)` cells
//! accumulate, so a file may list the same cell twice to add weight.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;
use umb_core::{Weather, WeatherSchedule};

use crate::{ModelError, ModelResult, SimInput, TransitionWeights};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct KindRecord {
    kind:       usize,
    carry_rate: f64,
}

#[derive(Deserialize)]
struct WeightRecord {
    kind:        usize,
    period:      usize,
    source:      usize,
    destination: usize,
    weight:      f64,
}

#[derive(Deserialize)]
struct PopulationRecord {
    building: usize,
    kind:     usize,
    count:    u64,
}

#[derive(Deserialize)]
struct WeatherRecord {
    tick:    u64,
    weather: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-kind carry rates.  Returns a `Vec` indexed by kind.
pub fn load_kinds_reader<R: Read>(reader: R) -> ModelResult<Vec<f64>> {
    let mut rows: Vec<KindRecord> = deserialize_all(reader)?;
    rows.sort_by_key(|r| r.kind);

    for (expected, row) in rows.iter().enumerate() {
        if row.kind != expected {
            return Err(ModelError::Parse(format!(
                "kinds must be numbered 0..K without gaps or repeats; found kind {} at position {expected}",
                row.kind
            )));
        }
    }
    Ok(rows.into_iter().map(|r| r.carry_rate).collect())
}

pub fn load_kinds_csv(path: &Path) -> ModelResult<Vec<f64>> {
    load_kinds_reader(File::open(path)?)
}

/// Load a sparse weight table into a dense `[kinds][period][buildings][buildings]` tensor.
pub fn load_weights_reader<R: Read>(
    reader:    R,
    kinds:     usize,
    period:    usize,
    buildings: usize,
) -> ModelResult<TransitionWeights> {
    let mut weights = TransitionWeights::zeros(kinds, period, buildings);
    for row in deserialize_all::<WeightRecord, _>(reader)? {
        let (k, p, s, d) = (row.kind, row.period, row.source, row.destination);
        if k >= kinds || p >= period || s >= buildings || d >= buildings {
            return Err(ModelError::Parse(format!(
                "weight row ({k}, {p}, {s}, {d}) outside shape [{kinds}][{period}][{buildings}][{buildings}]"
            )));
        }
        let total = weights.get(k, p, s, d) + row.weight;
        weights.set(k, p, s, d, total)?;
    }
    Ok(weights)
}

pub fn load_weights_csv(
    path:      &Path,
    kinds:     usize,
    period:    usize,
    buildings: usize,
) -> ModelResult<TransitionWeights> {
    load_weights_reader(File::open(path)?, kinds, period, buildings)
}

/// Load a sparse head-count table into a dense `[buildings][kinds]` matrix.
pub fn load_population_reader<R: Read>(
    reader:    R,
    buildings: usize,
    kinds:     usize,
) -> ModelResult<Vec<Vec<u64>>> {
    let mut population = vec![vec![0u64; kinds]; buildings];
    for row in deserialize_all::<PopulationRecord, _>(reader)? {
        let cell = population
            .get_mut(row.building)
            .and_then(|per_kind| per_kind.get_mut(row.kind))
            .ok_or_else(|| {
                ModelError::Parse(format!(
                    "population row (building {}, kind {}) outside [{buildings}][{kinds}]",
                    row.building, row.kind
                ))
            })?;
        let sum = u128::from(*cell) + u128::from(row.count);
        *cell = u64::try_from(sum).map_err(|_| ModelError::CapacityExceeded {
            what: "population cell",
            got:  sum,
            max:  u128::from(u64::MAX),
        })?;
    }
    Ok(population)
}

pub fn load_population_csv(path: &Path, buildings: usize, kinds: usize) -> ModelResult<Vec<Vec<u64>>> {
    load_population_reader(File::open(path)?, buildings, kinds)
}

/// Load a per-tick weather list.
pub fn load_weather_reader<R: Read>(reader: R) -> ModelResult<WeatherSchedule> {
    let mut rows: Vec<WeatherRecord> = deserialize_all(reader)?;
    rows.sort_by_key(|r| r.tick);

    let mut days = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let expected = i as u64 + 1;
        if row.tick != expected {
            return Err(ModelError::Parse(format!(
                "weather ticks must be numbered 1..N without gaps or repeats; found tick {} at position {expected}",
                row.tick
            )));
        }
        days.push(row.weather.parse::<Weather>()?);
    }
    Ok(WeatherSchedule::new(days))
}

pub fn load_weather_csv(path: &Path) -> ModelResult<WeatherSchedule> {
    load_weather_reader(File::open(path)?)
}

/// Load `kinds.csv`, `weights.csv`, and `population.csv` from `dir`.
///
/// The kind count comes from `kinds.csv`; the building count and period are
/// supplied by the caller because sparse tables cannot express trailing
/// empty buildings.
pub fn load_input_dir(dir: &Path, building_count: usize, move_rule_period: usize) -> ModelResult<SimInput> {
    let carry_rates = load_kinds_csv(&dir.join("kinds.csv"))?;
    let kind_count = carry_rates.len();

    let mut input = SimInput::new(kind_count, building_count, move_rule_period);
    input.carry_rates = carry_rates;
    input.weights = load_weights_csv(&dir.join("weights.csv"), kind_count, move_rule_period, building_count)?;
    input.population = load_population_csv(&dir.join("population.csv"), building_count, kind_count)?;
    input.validate()?;

    info!(
        "loaded input from {}: {kind_count} kinds, {building_count} buildings, period {move_rule_period}",
        dir.display()
    );
    Ok(input)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn deserialize_all<T, R>(reader: R) -> ModelResult<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<T>()
        .map(|r| r.map_err(|e| ModelError::Parse(e.to_string())))
        .collect()
}

//! campus: runs the umbrella simulation from a TOML run file, or on a
//! built-in synthetic campus when no file is given.
//!
//! ```text
//! campus --config campus.toml --out output/campus --ticks 96
//! RUST_LOG=debug campus --workers 4 --quiet
//! ```

mod campus;
mod config;
mod console;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use umb_output::{CsvWriter, OutputWriter, SnapshotRecorder};
use umb_sim::SimBuilder;

use crate::config::{OutputConfig, OutputFormat, RunConfig};
use crate::console::ConsoleObserver;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML run file.  Without it a synthetic campus is simulated.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory (overrides `[output] dir`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Global seed (overrides `[sim] seed`).
    #[arg(long)]
    seed: Option<u64>,

    /// Worker count (overrides `[sim] num_workers`).
    #[arg(long)]
    workers: Option<usize>,

    /// Simulation length in ticks (overrides `[sim] simulation_length`).
    #[arg(long)]
    ticks: Option<u64>,

    /// Print only the end-of-run totals.
    #[arg(long)]
    quiet: bool,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::debug!("{args:#?}");

    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::synthetic_default(),
    };
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }
    if let Some(workers) = args.workers {
        config.sim.num_workers = Some(workers);
    }
    if let Some(ticks) = args.ticks {
        config.sim.simulation_length = ticks;
    }
    if let Some(out) = &args.out {
        config.output.dir = Some(out.clone());
    }

    let input = config.build_input()?;
    let weather = config.build_weather()?;
    let mut sim = SimBuilder::new(config.sim.clone(), input, weather)
        .build()
        .context("failed to build simulation")?;

    let recorder = open_recorder(&config.output)?;
    let mut observer = ConsoleObserver::new(std::io::stdout().lock(), args.quiet, recorder);

    let t0 = Instant::now();
    sim.run(&mut observer).context("simulation aborted")?;
    log::info!(
        "{} ticks in {:.3} s on {} workers",
        observer.ticks,
        t0.elapsed().as_secs_f64(),
        sim.worker_count()
    );
    Ok(())
}

fn open_recorder(output: &OutputConfig) -> Result<Option<SnapshotRecorder<Box<dyn OutputWriter>>>> {
    let Some(dir) = &output.dir else {
        return Ok(None);
    };
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {dir:?}"))?;

    let writer: Box<dyn OutputWriter> = match output.format {
        OutputFormat::Csv => Box::new(CsvWriter::new(dir).context("failed to open CSV output")?),
        #[cfg(feature = "sqlite")]
        OutputFormat::Sqlite => {
            Box::new(umb_output::SqliteWriter::new(dir).context("failed to open SQLite output")?)
        }
        #[cfg(not(feature = "sqlite"))]
        OutputFormat::Sqlite => anyhow::bail!("SQLite output needs the `sqlite` feature"),
    };
    log::info!("writing {:?} output to {dir:?}", output.format);
    Ok(Some(SnapshotRecorder::new(writer, output.building_interval)))
}

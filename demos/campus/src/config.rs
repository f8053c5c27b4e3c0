//! TOML run configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use umb_core::{CoreResult, ConstantWeather, RainProbability, SimConfig, Tick, Weather, WeatherOracle, WeatherSchedule};
use umb_model::{SimInput, load_input_dir, load_weather_csv};

use crate::campus::{CampusConfig, generate};

/// Everything one run needs.  Relative paths are resolved against the
/// directory of the run file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub sim:     SimConfig,
    #[serde(default)]
    pub input:   InputConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub output:  OutputConfig,
}

/// Where the model comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum InputConfig {
    /// `kinds.csv`, `weights.csv`, `population.csv` in `dir`.
    Csv {
        dir:              PathBuf,
        building_count:   usize,
        move_rule_period: usize,
    },
    Synthetic(CampusConfig),
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig::Synthetic(CampusConfig::default())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum WeatherConfig {
    Constant { weather: Weather },
    /// Rain with `probability` each tick; `seed` defaults to the run seed.
    Probability { probability: f64, seed: Option<u64> },
    /// Per-tick `weather.csv`, repeated cyclically.
    Schedule { file: PathBuf },
}

impl Default for WeatherConfig {
    fn default() -> Self {
        WeatherConfig::Probability { probability: 0.3, seed: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// No files are written when absent.
    pub dir:               Option<PathBuf>,
    #[serde(default)]
    pub format:            OutputFormat,
    /// Per-building rows every this many ticks; 0 disables them.
    #[serde(default = "default_building_interval")]
    pub building_interval: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: None, format: OutputFormat::Csv, building_interval: default_building_interval() }
    }
}

fn default_building_interval() -> u64 {
    24
}

impl RunConfig {
    /// Load and parse a TOML run file, resolving its relative paths.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?;
        let mut config: RunConfig =
            toml::from_str(&text).with_context(|| format!("failed to parse {path:?}"))?;

        let base = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(base);
        Ok(config)
    }

    /// Built-in synthetic campus used when no run file is given.
    pub fn synthetic_default() -> Self {
        Self {
            sim:     SimConfig { simulation_length: 72, seed: 42, num_workers: None },
            input:   InputConfig::default(),
            weather: WeatherConfig::default(),
            output:  OutputConfig::default(),
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let InputConfig::Csv { dir, .. } = &mut self.input {
            *dir = base.join(&*dir);
        }
        if let WeatherConfig::Schedule { file } = &mut self.weather {
            *file = base.join(&*file);
        }
        if let Some(dir) = &mut self.output.dir {
            *dir = base.join(&*dir);
        }
    }

    /// Load or generate the model input.
    pub fn build_input(&self) -> Result<SimInput> {
        match &self.input {
            InputConfig::Csv { dir, building_count, move_rule_period } => {
                load_input_dir(dir, *building_count, *move_rule_period)
                    .with_context(|| format!("failed to load input from {dir:?}"))
            }
            InputConfig::Synthetic(campus) => {
                generate(campus, self.sim.seed).context("failed to generate synthetic campus")
            }
        }
    }

    pub fn build_weather(&self) -> Result<RunWeather> {
        Ok(match &self.weather {
            WeatherConfig::Constant { weather } => RunWeather::Constant(ConstantWeather(*weather)),
            WeatherConfig::Probability { probability, seed } => {
                let seed = seed.unwrap_or(self.sim.seed);
                RunWeather::Probability(
                    RainProbability::new(*probability, seed).context("invalid rain probability")?,
                )
            }
            WeatherConfig::Schedule { file } => {
                let schedule =
                    load_weather_csv(file).with_context(|| format!("failed to load {file:?}"))?;
                if schedule.is_empty() {
                    bail!("weather schedule {file:?} has no rows");
                }
                RunWeather::Schedule(schedule)
            }
        })
    }
}

// ── RunWeather ────────────────────────────────────────────────────────────────

/// The oracle selected by `[weather]`.
#[derive(Debug, Clone)]
pub enum RunWeather {
    Constant(ConstantWeather),
    Probability(RainProbability),
    Schedule(WeatherSchedule),
}

impl WeatherOracle for RunWeather {
    fn weather(&self, simulation_length: u64, tick: Tick) -> CoreResult<Weather> {
        match self {
            RunWeather::Constant(w)    => w.weather(simulation_length, tick),
            RunWeather::Probability(w) => w.weather(simulation_length, tick),
            RunWeather::Schedule(w)    => w.weather(simulation_length, tick),
        }
    }
}

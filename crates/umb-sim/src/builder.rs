//! Builder for constructing a [`Sim`].

use log::info;
use umb_core::{SimConfig, StreamRng, WeatherOracle};
use umb_model::{Population, SimInput};

use crate::{Sim, SimError, SimResult, Workspace};

/// Builder for [`Sim<W>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: run length, seed, worker count
/// - [`SimInput`] : kinds, buildings, weights, initial population
/// - `W: WeatherOracle`: the per-tick weather source
///
/// Every configuration problem is reported by [`build`](Self::build); once a
/// `Sim` exists it holds a valid model and population.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, input, ConstantWeather(Weather::Cloudy))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<W: WeatherOracle> {
    config:  SimConfig,
    input:   SimInput,
    weather: W,
}

impl<W: WeatherOracle> SimBuilder<W> {
    pub fn new(config: SimConfig, input: SimInput, weather: W) -> Self {
        Self { config, input, weather }
    }

    /// Validate inputs, build the transition model, materialize the
    /// population, and size the per-run workspace.
    ///
    /// # Errors
    ///
    /// - `SimError::Config` if `num_workers == Some(0)`.
    /// - `SimError::Model` for invalid dimensions, degenerate transition rows,
    ///   or counts beyond id capacity.
    /// - `SimError::ThreadPool` (feature `parallel`) if the pool cannot start.
    pub fn build(self) -> SimResult<Sim<W>> {
        if self.config.num_workers == Some(0) {
            return Err(SimError::Config("num_workers must be at least 1".into()));
        }

        let model = self.input.build_model()?;
        let population = Population::initialize(&self.input)?;

        let building_count = self.input.building_count;
        let worker_count = self.config.num_workers.unwrap_or_else(default_worker_count);
        let workspace = Workspace::new(worker_count, building_count);

        let rngs = (0..building_count as u64)
            .map(|b| StreamRng::new(self.config.seed, b))
            .collect();

        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workspace.worker_count())
            .thread_name(|i| format!("umb-worker-{i}"))
            .build()?;

        info!(
            "built sim: {} buildings, {} kinds, period {}, {} agents, {} workers x {} buildings, {} ticks",
            building_count,
            self.input.kind_count,
            self.input.move_rule_period,
            population.total,
            workspace.worker_count(),
            workspace.chunk_len(),
            self.config.simulation_length,
        );

        Ok(Sim {
            clock:            self.config.make_clock(),
            config:           self.config,
            model,
            total_population: population.total,
            buildings:        population.buildings,
            rngs,
            workspace,
            weather:          self.weather,
            last_weather:     None,
            last_stats:       Default::default(),
            initial_emitted:  false,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}

#[cfg(feature = "parallel")]
fn default_worker_count() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn default_worker_count() -> usize {
    1
}

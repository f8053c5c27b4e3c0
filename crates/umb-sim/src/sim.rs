//! The `Sim` struct and its tick loop.

use log::{debug, info, trace};
use umb_core::{BuildingId, SimClock, SimConfig, StreamRng, Tick, Weather, WeatherOracle};
use umb_model::{Building, TransitionModel};

use crate::commit::commit_building;
use crate::resolve::{Round, resolve_building};
use crate::{SimError, SimObserver, SimResult, TickSnapshot, TickStats, Workspace};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// Holds the read-only transition model, the mutable building state, one
/// random stream per building, and the per-worker workspace.  Each call to
/// [`step`](Self::step) runs one full scatter → gather → reduce round.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<W: WeatherOracle> {
    /// Run length, seed, worker count.
    pub config: SimConfig,

    /// The last tick whose snapshot was emitted (or is about to be).
    pub clock: SimClock,

    /// Read-only CDF table shared by every worker.
    pub model: TransitionModel,

    /// Head count fixed at initialization; never changes during the run.
    pub total_population: u64,

    /// Building state, indexed by `BuildingId`.
    pub buildings: Vec<Building>,

    /// One random stream per building, indexed by `BuildingId`.
    pub rngs: Vec<StreamRng>,

    pub(crate) workspace: Workspace,

    /// The weather oracle.  Queried exactly once per movement tick.
    pub weather: W,

    pub(crate) last_weather:    Option<Weather>,
    pub(crate) last_stats:      TickStats,
    pub(crate) initial_emitted: bool,

    #[cfg(feature = "parallel")]
    pub(crate) pool: rayon::ThreadPool,
}

impl<W: WeatherOracle> Sim<W> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Emit tick 0 (if not yet emitted), run every remaining tick, and call
    /// `on_sim_end`.
    ///
    /// Stops at the first weather or emitter error.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!("running {} ticks", self.clock.remaining());
        self.emit_initial(observer)?;
        while !self.clock.is_finished() {
            self.step(observer)?;
        }

        let final_tick = self.clock.current_tick;
        observer
            .on_sim_end(final_tick)
            .map_err(|source| SimError::Emit { tick: final_tick, source })?;
        info!("finished at {final_tick}");
        Ok(())
    }

    /// Run at most `n` movement ticks (fewer if the run ends first).
    ///
    /// Emits tick 0 first if it has not been emitted.  Does not call
    /// `on_sim_end`.  Returns the number of ticks actually run.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<u64> {
        self.emit_initial(observer)?;
        let mut ran = 0;
        while ran < n && !self.clock.is_finished() {
            self.step(observer)?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Process the next movement tick and emit its snapshot.
    ///
    /// Emits tick 0 first if it has not been emitted.  Returns
    /// `SimError::Finished` once `simulation_length` ticks have run; the
    /// weather oracle is not queried and nothing is emitted.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        self.emit_initial(observer)?;
        if self.clock.is_finished() {
            return Err(SimError::Finished(self.clock.current_tick));
        }

        let tick = self.clock.current_tick.offset(1);
        let weather = self
            .weather
            .weather(self.config.simulation_length, tick)
            .map_err(|source| SimError::Weather { tick, source })?;
        trace!("{tick}: {weather}");

        let round = Round {
            period:  tick.period_index(self.model.period()),
            is_rain: weather.is_rain(),
        };
        let stats = self.process_round(round);

        self.clock.advance();
        self.last_weather = Some(weather);
        self.last_stats = stats;
        debug!(
            "{tick} {weather}: transfers={} starved={} lost_umbrella={}",
            stats.transfer_count, stats.starve_count, stats.lose_umbrella_count
        );

        let snapshot = self.snapshot();
        observer
            .on_snapshot(&snapshot)
            .map_err(|source| SimError::Emit { tick, source })?;
        Ok(stats)
    }

    /// View of the current state, as last emitted.
    pub fn snapshot(&self) -> TickSnapshot<'_> {
        TickSnapshot {
            tick:             self.clock.current_tick,
            weather:          self.last_weather,
            total_population: self.total_population,
            stats:            self.last_stats,
            buildings:        &self.buildings,
        }
    }

    /// Workers used by the scatter/gather phases.
    pub fn worker_count(&self) -> usize {
        self.workspace.worker_count()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn emit_initial<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.initial_emitted {
            return Ok(());
        }
        self.initial_emitted = true;
        let snapshot = self.snapshot();
        observer
            .on_snapshot(&snapshot)
            .map_err(|source| SimError::Emit { tick: Tick::ZERO, source })
    }

    /// Scatter, join, gather, join, reduce.
    fn process_round(&mut self, round: Round) -> TickStats {
        #[cfg(feature = "parallel")]
        let received = {
            let buildings = &mut self.buildings;
            let rngs = &mut self.rngs;
            let workspace = &mut self.workspace;
            let model = &self.model;
            self.pool.install(|| {
                scatter(buildings, rngs, workspace, model, round);
                gather(buildings, workspace, round.is_rain)
            })
        };

        #[cfg(not(feature = "parallel"))]
        let received = {
            scatter(&mut self.buildings, &mut self.rngs, &mut self.workspace, &self.model, round);
            gather(&mut self.buildings, &self.workspace, round.is_rain)
        };

        let stats = self.workspace.reduce_and_reset();
        debug_assert_eq!(stats.transfer_count, received, "every staged mover must arrive");
        debug_assert_eq!(stats.evaluated_count, self.total_population);
        stats
    }
}

// ── Phases ────────────────────────────────────────────────────────────────────

/// Scatter: every worker resolves its own contiguous chunk of buildings.
///
/// Returns only once every worker has finished, so all outboxes are complete.
fn scatter(
    buildings: &mut [Building],
    rngs:      &mut [StreamRng],
    workspace: &mut Workspace,
    model:     &TransitionModel,
    round:     Round,
) {
    let chunk_len = workspace.chunk_len();

    let resolve_chunk = |w: usize, chunk: &mut [Building], chunk_rngs: &mut [StreamRng], worker: &mut crate::WorkerWorkspace| {
        let first = w * chunk_len;
        for (offset, (building, rng)) in chunk.iter_mut().zip(chunk_rngs).enumerate() {
            let source = BuildingId((first + offset) as u32);
            resolve_building(source, building, rng, model, round, worker);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        buildings
            .par_chunks_mut(chunk_len)
            .zip(rngs.par_chunks_mut(chunk_len))
            .zip(workspace.workers_mut().par_iter_mut())
            .enumerate()
            .for_each(|(w, ((chunk, chunk_rngs), worker))| resolve_chunk(w, chunk, chunk_rngs, worker));
    }

    #[cfg(not(feature = "parallel"))]
    {
        buildings
            .chunks_mut(chunk_len)
            .zip(rngs.chunks_mut(chunk_len))
            .zip(workspace.workers_mut().iter_mut())
            .enumerate()
            .for_each(|(w, ((chunk, chunk_rngs), worker))| resolve_chunk(w, chunk, chunk_rngs, worker));
    }
}

/// Gather: every destination building pulls its arrivals from all outboxes.
///
/// Returns the total number of arrivals.
fn gather(buildings: &mut [Building], workspace: &Workspace, is_rain: bool) -> u64 {
    let workers = workspace.workers();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        buildings
            .par_iter_mut()
            .enumerate()
            .map(|(d, building)| commit_building(BuildingId(d as u32), building, workers, is_rain))
            .sum()
    }

    #[cfg(not(feature = "parallel"))]
    {
        buildings
            .iter_mut()
            .enumerate()
            .map(|(d, building)| commit_building(BuildingId(d as u32), building, workers, is_rain))
            .sum()
    }
}

//! Per-run, per-worker scratch space for the scatter/gather phases.
//!
//! # Partitioning
//!
//! Buildings are split into contiguous chunks of `chunk_len`, one chunk per
//! worker.  During scatter a worker mutates only its own chunk's buildings
//! and writes movers only into its own outbox, so no two workers ever touch
//! the same memory.  During gather each destination building reads every
//! worker's outbox slot for that destination; outboxes are read-only then.
//!
//! Because worker `w` owns buildings `[w * chunk_len, (w + 1) * chunk_len)`,
//! concatenating outboxes in worker order yields arrivals in source-building
//! order, whatever the worker count.

use umb_core::BuildingId;
use umb_model::Agent;

use crate::TickStats;

// ── WorkerWorkspace ───────────────────────────────────────────────────────────

/// One worker's outbox (one staging list per destination building) plus its
/// private tick counters.
#[derive(Debug)]
pub struct WorkerWorkspace {
    outbox:   Vec<Vec<Agent>>,
    counters: TickStats,
}

impl WorkerWorkspace {
    fn new(building_count: usize) -> Self {
        Self {
            outbox:   vec![Vec::new(); building_count],
            counters: TickStats::default(),
        }
    }

    /// Stage `agent` for delivery to `dest` in the gather phase.
    #[inline]
    pub fn stage(&mut self, dest: BuildingId, agent: Agent) {
        self.outbox[dest.index()].push(agent);
    }

    /// Agents staged for `dest` this tick.
    #[inline]
    pub fn outbox(&self, dest: BuildingId) -> &[Agent] {
        &self.outbox[dest.index()]
    }

    #[inline]
    pub fn counters_mut(&mut self) -> &mut TickStats {
        &mut self.counters
    }

    pub fn counters(&self) -> TickStats {
        self.counters
    }

    /// Agents staged across all destinations.
    pub fn staged_len(&self) -> usize {
        self.outbox.iter().map(Vec::len).sum()
    }

    /// Empty every outbox (keeping capacity) and return the counters, reset
    /// to zero.
    pub fn reset(&mut self) -> TickStats {
        for slot in &mut self.outbox {
            slot.clear();
        }
        std::mem::take(&mut self.counters)
    }
}

// ── Workspace ─────────────────────────────────────────────────────────────────

/// All workers' scratch space, sized from the run's configuration.
#[derive(Debug)]
pub struct Workspace {
    workers:   Vec<WorkerWorkspace>,
    chunk_len: usize,
}

impl Workspace {
    /// Allocate `worker_count` workspaces for `building_count` buildings.
    ///
    /// The worker count is capped at the building count so that every worker
    /// owns at least one building.  Both counts must be non-zero.
    pub fn new(worker_count: usize, building_count: usize) -> Self {
        debug_assert!(worker_count > 0 && building_count > 0);
        let workers_used = worker_count.min(building_count).max(1);
        let chunk_len = building_count.div_ceil(workers_used);
        // Recompute so no worker is left with an empty chunk.
        let workers_used = building_count.div_ceil(chunk_len);

        Self {
            workers: (0..workers_used)
                .map(|_| WorkerWorkspace::new(building_count))
                .collect(),
            chunk_len,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Buildings per worker (the last worker may own fewer).
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Index of the worker that owns `building`.
    pub fn owner(&self, building: BuildingId) -> usize {
        building.index() / self.chunk_len
    }

    pub fn workers(&self) -> &[WorkerWorkspace] {
        &self.workers
    }

    pub fn workers_mut(&mut self) -> &mut [WorkerWorkspace] {
        &mut self.workers
    }

    /// Sum every worker's counters into one `TickStats`, clear all outboxes,
    /// and zero the counters for the next tick.
    pub fn reduce_and_reset(&mut self) -> TickStats {
        let mut total = TickStats::default();
        for worker in &mut self.workers {
            total += worker.reset();
        }
        total
    }
}

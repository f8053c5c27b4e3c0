//! Movement resolver: the scatter half of a tick.

use umb_core::{BuildingId, StreamRng};
use umb_model::{Building, TransitionModel};

use crate::WorkerWorkspace;

/// Inputs shared by every building in one movement round.
#[derive(Copy, Clone, Debug)]
pub struct Round {
    /// Active move-rule slice, `tick mod R`.
    pub period:  usize,
    pub is_rain: bool,
}

/// Evaluate every current resident of `building` exactly once.
///
/// For each resident a destination is drawn from the building's own stream.
/// Staying is a no-op.  Leaving in the rain needs an umbrella from the
/// building's pool; with the pool empty the agent is starved and stays.
/// Movers are removed with swap-remove (the cursor does not advance, so the
/// swapped-in resident is still evaluated) and staged in `worker`'s outbox.
pub fn resolve_building(
    source:   BuildingId,
    building: &mut Building,
    rng:      &mut StreamRng,
    model:    &TransitionModel,
    round:    Round,
    worker:   &mut WorkerWorkspace,
) {
    let residents = &mut building.residents;
    let mut j = 0;

    while j < residents.len() {
        worker.counters_mut().evaluated_count += 1;

        let kind = residents[j].kind;
        let dest = model.sample(kind, round.period, source, rng.unit());
        if dest == source {
            j += 1;
            continue;
        }

        if round.is_rain && building.umbrella_count == 0 {
            let counters = worker.counters_mut();
            counters.starve_count += 1;
            if residents[j].carries_umbrella {
                counters.lose_umbrella_count += 1;
            }
            j += 1;
            continue;
        }

        if round.is_rain {
            building.umbrella_count -= 1;
        }
        residents[j].carries_umbrella = round.is_rain;

        let agent = residents.swap_remove(j);
        worker.stage(dest, agent);
        worker.counters_mut().transfer_count += 1;
    }
}

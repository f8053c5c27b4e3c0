//! Transfer committer: the gather half of a tick.

use umb_core::BuildingId;
use umb_model::Building;

use crate::WorkerWorkspace;

/// Append every worker's staged arrivals for `dest` to `building`, in worker
/// order, and return the arrival count.
///
/// In the rain the destination's umbrella pool is credited by the arrival
/// head count, regardless of each arriving agent's own flag.
pub fn commit_building(
    dest:     BuildingId,
    building: &mut Building,
    workers:  &[WorkerWorkspace],
    is_rain:  bool,
) -> u64 {
    let arriving: usize = workers.iter().map(|w| w.outbox(dest).len()).sum();
    if arriving == 0 {
        return 0;
    }

    building.residents.reserve(arriving);
    for worker in workers {
        building.residents.extend_from_slice(worker.outbox(dest));
    }

    let arriving = arriving as u64;
    if is_rain {
        building.umbrella_count += arriving;
    }
    arriving
}

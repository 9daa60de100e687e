// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::time::Duration;

use crate::graph::{predecessors, Graph, Multiplex};
use crate::model::TaskId;
use crate::program::{IdMap, IdMapEntry};
use crate::schedule::Schedule;

use super::worker::StepResult;

/// Per-task cost telemetry (§4.5 "Cost telemetry"): the task's own compute
/// elapsed, plus the receive-side elapsed attributed to each predecessor that
/// lives on a different worker. Communication elapsed is only ever visible in
/// the *receiving* worker's entry (§9 "Cost collection").
#[derive(Clone, Debug, PartialEq)]
pub struct CostEntry {
    pub compute_elapsed: Duration,
    pub comm_elapsed: BTreeMap<TaskId, Duration>,
}

/// Build the `costs` sub-mapping (§4.5, §6). `reduced`/`schedule`/`multiplex`
/// come straight out of the planner's output; `idmaps`/`results` are the
/// executor's.
pub fn collect_costs(
    reduced: &Graph,
    schedule: &Schedule,
    multiplex: &Multiplex,
    idmaps: &[IdMap],
    results: &[Vec<StepResult>],
) -> BTreeMap<TaskId, CostEntry> {
    let mut compute_elapsed: BTreeMap<TaskId, Duration> = BTreeMap::new();
    let mut receive_elapsed: BTreeMap<(usize, TaskId), Duration> = BTreeMap::new();

    for (worker, (idmap, worker_results)) in idmaps.iter().zip(results.iter()).enumerate() {
        for (entry, result) in idmap.iter().zip(worker_results.iter()) {
            match entry {
                IdMapEntry::Task(ids) => {
                    for id in ids {
                        compute_elapsed.insert(id.clone(), result.elapsed);
                    }
                }
                IdMapEntry::Communication(producer_ids, _) => {
                    // A Communication entry appears on both the sending and the
                    // receiving worker's program; it's a receive only where the
                    // producer's own placement is on some *other* worker.
                    if let Some(producer) = producer_ids.first() {
                        if schedule.placements.get(producer).is_some_and(|p| p.worker != worker) {
                            receive_elapsed.insert((worker, producer.clone()), result.elapsed);
                        }
                    }
                }
                IdMapEntry::Null => {}
            }
        }
    }

    let preds = predecessors(reduced);
    let mut out: BTreeMap<TaskId, CostEntry> = BTreeMap::new();

    for id in reduced.ids() {
        let own_worker = schedule.placements.get(id).map(|p| p.worker);
        let mut comm: BTreeMap<TaskId, Duration> = BTreeMap::new();

        if let Some(predecessor_ids) = preds.get(id) {
            for predecessor in predecessor_ids {
                let predecessor_worker = schedule.placements.get(predecessor).map(|p| p.worker);
                if predecessor_worker == own_worker {
                    continue;
                }
                if let Some(worker) = own_worker {
                    if let Some(elapsed) = receive_elapsed.get(&(worker, predecessor.clone())) {
                        comm.insert(predecessor.clone(), *elapsed);
                    }
                }
            }
        }

        let entry = CostEntry {
            compute_elapsed: compute_elapsed.get(id).copied().unwrap_or_default(),
            comm_elapsed: comm,
        };

        if let Some(dupes) = multiplex.get(id) {
            for dup in dupes {
                out.insert(dup.clone(), entry.clone());
            }
        }
        out.insert(id.clone(), entry);
    }

    out
}

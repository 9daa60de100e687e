// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use crate::failure::PlanningError;
use crate::graph::{comm_costs, compute_costs, predecessors, remove_duplicates, successors, Graph, Multiplex};
use crate::model::{list_dependencies, TaskId};
use crate::observability::messages::planner::TaskScheduled;
use crate::observability::messages::StructuredLog;
use crate::schedule::rank::upward_rank;
use crate::schedule::timeline::Timeline;

/// Verify the graph has no cycle before anything downstream walks it (§3 "The
/// graph is acyclic (enforced implicitly by rank computation terminating)").
/// Runs on the caller's original graph, ahead of `remove_duplicates`, whose
/// own tier-walk would otherwise panic on cyclic input instead of letting
/// this check raise the §7 "Fatality" planning error the taxonomy reserves
/// for exactly that case. A standard Kahn's-algorithm tier peel: each pass
/// removes every task whose predecessors have all already been removed; a
/// task surviving every pass sits on a cycle.
fn assert_acyclic(graph: &Graph) -> Result<(), PlanningError> {
    let mut remaining: HashMap<TaskId, HashSet<TaskId>> = graph
        .iter()
        .map(|(id, node)| (id.clone(), list_dependencies(&node.args)))
        .collect();
    let succ = successors(graph);

    loop {
        let ready: Vec<TaskId> = remaining
            .iter()
            .filter(|(_, preds)| preds.is_empty())
            .map(|(id, _)| id.clone())
            .collect();

        if ready.is_empty() {
            break;
        }
        for id in &ready {
            remaining.remove(id);
            if let Some(consumers) = succ.get(id) {
                for consumer in consumers {
                    if let Some(preds) = remaining.get_mut(consumer) {
                        preds.remove(id);
                    }
                }
            }
        }
    }

    if let Some(stuck) = remaining.keys().next() {
        return Err(PlanningError::CyclicGraph { from: stuck.clone() });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub worker: usize,
    pub start: f64,
    pub finish: f64,
}

/// The list-scheduler's output: every task's worker/start/finish, plus each
/// worker's ordered timeline (§4.3 invariants: sorted, non-overlapping, one
/// worker per task).
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    pub placements: HashMap<TaskId, Placement>,
    pub timelines: Vec<Timeline>,
}

pub struct PlannerOutput {
    pub reduced: Graph,
    pub multiplex: Multiplex,
    pub schedule: Schedule,
}

/// Run duplicate elimination, upward-rank priority, and EFT list scheduling
/// in sequence (§4.2-§4.3). This is the part of the planner entry point
/// (§6) that runs before program generation.
pub fn plan(graph: &Graph, worker_count: usize) -> Result<PlannerOutput, PlanningError> {
    if worker_count == 0 {
        return Err(PlanningError::ZeroWorkers);
    }

    for (id, node) in graph.iter() {
        for dep in list_dependencies(&node.args) {
            if !graph.contains(&dep) {
                return Err(PlanningError::MissingPredecessor { task: id.clone(), missing: dep });
            }
        }
    }

    assert_acyclic(graph)?;

    let reduced_out = remove_duplicates(graph);
    let reduced = &reduced_out.graph;

    let preds = predecessors(reduced);
    let comm = comm_costs(reduced);
    let compute = compute_costs(reduced);
    let ranks = upward_rank(reduced);

    let mut priority: Vec<&TaskId> = reduced.ids().collect();
    priority.sort_by(|a, b| {
        ranks[*b]
            .partial_cmp(&ranks[*a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut timelines: Vec<Timeline> = (0..worker_count).map(|_| Timeline::new()).collect();
    let mut placements: HashMap<TaskId, Placement> = HashMap::new();

    for task in priority {
        let deps = preds.get(task).cloned().unwrap_or_default();
        let duration = compute.get(task).copied().unwrap_or(0.0);

        let mut best: Option<(usize, f64)> = None;
        for worker in 0..worker_count {
            let earliest_start = deps.iter().fold(0.0_f64, |acc, dep| {
                let placement = placements
                    .get(dep)
                    .expect("predecessor must already be placed: upward rank guarantees predecessors outrank their consumers");
                let availability = if placement.worker == worker {
                    placement.finish
                } else {
                    let cost = comm.get(task).and_then(|m| m.get(dep)).copied().unwrap_or(0.0);
                    placement.finish + cost
                };
                acc.max(availability)
            });

            let candidate = timelines[worker].find_idle_slot(earliest_start, duration);
            if best.map_or(true, |(_, best_start)| candidate < best_start) {
                best = Some((worker, candidate));
            }
        }

        let (worker, start) = best.ok_or_else(|| PlanningError::UnplaceableTask { task: task.clone() })?;
        let finish = start + duration;
        timelines[worker].insert(task.clone(), start, finish);
        placements.insert(task.clone(), Placement { worker, start, finish });
        TaskScheduled { task, worker, start, finish }.log();
    }

    Ok(PlannerOutput {
        reduced: reduced.clone(),
        multiplex: reduced_out.multiplex,
        schedule: Schedule { placements, timelines },
    })
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};

use crate::graph::{comm_costs, compute_costs, successors, Graph};
use crate::model::TaskId;

fn mean_comm(costs: &BTreeMap<TaskId, f64>) -> f64 {
    if costs.is_empty() {
        0.0
    } else {
        costs.values().sum::<f64>() / costs.len() as f64
    }
}

/// Upward rank (§4.3): the critical-path cost from a task to the farthest
/// exit task reachable from it, including the mean communication cost of its
/// own incoming edges. Computed by memoized recursion from sinks toward
/// roots, which terminates because the graph is acyclic — the "repeatedly
/// expand from already-ranked successors" fixed point the spec describes.
pub fn upward_rank(graph: &Graph) -> HashMap<TaskId, f64> {
    let succ = successors(graph);
    let compute = compute_costs(graph);
    let comm = comm_costs(graph);

    let mut memo: HashMap<TaskId, f64> = HashMap::new();
    for id in graph.ids() {
        rank_of(id, &succ, &compute, &comm, &mut memo);
    }
    memo
}

fn rank_of(
    id: &TaskId,
    succ: &HashMap<TaskId, Vec<TaskId>>,
    compute: &HashMap<TaskId, f64>,
    comm: &HashMap<TaskId, BTreeMap<TaskId, f64>>,
    memo: &mut HashMap<TaskId, f64>,
) -> f64 {
    if let Some(r) = memo.get(id) {
        return *r;
    }

    let own_comm = comm.get(id).map(mean_comm).unwrap_or(0.0);
    let base = compute.get(id).copied().unwrap_or(0.0) + own_comm;

    let successor_sum: f64 = succ
        .get(id)
        .map(|successors| successors.iter().map(|s| rank_of(s, succ, compute, comm, memo)).sum())
        .unwrap_or(0.0);

    let rank = base + successor_sum;
    memo.insert(id.clone(), rank);
    rank
}

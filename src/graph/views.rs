// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::graph::task_node::Graph;
use crate::model::{list_communication_costs, list_dependencies, TaskId};

/// `predecessors(g)`: for every task, the set of producers it directly depends on.
pub fn predecessors(graph: &Graph) -> HashMap<TaskId, BTreeSet<TaskId>> {
    graph
        .iter()
        .map(|(id, node)| (id.clone(), list_dependencies(&node.args)))
        .collect()
}

/// `successors(g)`: the reverse of [`predecessors`] — for every producer, the
/// consumers that name it in their args.
pub fn successors(graph: &Graph) -> HashMap<TaskId, Vec<TaskId>> {
    let mut out: HashMap<TaskId, Vec<TaskId>> = HashMap::new();
    for (id, node) in graph.iter() {
        for producer in list_dependencies(&node.args) {
            out.entry(producer).or_default().push(id.clone());
        }
    }
    out
}

/// `computeCosts(g)`: each task's own compute cost.
pub fn compute_costs(graph: &Graph) -> HashMap<TaskId, f64> {
    graph.iter().map(|(id, node)| (id.clone(), node.compute_cost)).collect()
}

/// `commCosts(g)`: for every task, the per-predecessor communication cost it
/// declared (the max across all occurrences of that predecessor in its args).
pub fn comm_costs(graph: &Graph) -> HashMap<TaskId, BTreeMap<TaskId, f64>> {
    graph
        .iter()
        .map(|(id, node)| (id.clone(), list_communication_costs(&node.args)))
        .collect()
}

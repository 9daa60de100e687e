// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use crate::graph::task_node::{Graph, TaskNode};
use crate::model::{equivalent_args, list_dependencies, relabel_dependencies, GraphArgs, TaskId};

/// `multiplex: TaskID -> [TaskID]`, mapping a retained task to the duplicates
/// merged into it.
pub type Multiplex = HashMap<TaskId, Vec<TaskId>>;

pub struct ReducedGraph {
    pub graph: Graph,
    pub multiplex: Multiplex,
}

/// Remove duplicate tasks tier by tier from the roots downward (§4.2). Two
/// tasks in the same tier are duplicates when their function identities match
/// and their args are `equivalentArgs`. The first of a duplicate set is kept;
/// its compute cost becomes the max of the merged costs; every successor of a
/// removed duplicate has its dependency relabelled to the kept task.
pub fn remove_duplicates(graph: &Graph) -> ReducedGraph {
    // successors(g): producer -> consumers that depend on it, built once from
    // the original (pre-relabel) args, since relabelling only changes *which*
    // id a dependency names, never whether the edge exists.
    let mut successors: HashMap<TaskId, Vec<TaskId>> = HashMap::new();
    let mut remaining_preds: HashMap<TaskId, HashSet<TaskId>> = HashMap::new();
    let mut working_args: HashMap<TaskId, GraphArgs> = HashMap::new();

    for (id, node) in graph.iter() {
        let preds = list_dependencies(&node.args);
        for pred in &preds {
            successors.entry(pred.clone()).or_default().push(id.clone());
        }
        remaining_preds.insert(id.clone(), preds.into_iter().collect());
        working_args.insert(id.clone(), node.args.clone());
    }

    let mut processed: HashSet<TaskId> = HashSet::new();
    let mut dropped: HashSet<TaskId> = HashSet::new();
    let mut multiplex: Multiplex = HashMap::new();
    let mut kept: HashMap<TaskId, TaskNode> = HashMap::new();

    let all_ids: Vec<TaskId> = graph.ids().cloned().collect();

    while processed.len() < all_ids.len() {
        let tier: Vec<TaskId> = all_ids
            .iter()
            .filter(|id| !processed.contains(*id) && remaining_preds[*id].is_empty())
            .cloned()
            .collect();

        assert!(
            !tier.is_empty(),
            "graph preprocessing found no zero-predecessor tier; the graph is not acyclic"
        );

        let mut kept_this_tier: Vec<TaskId> = Vec::new();

        for id in &tier {
            let node = graph.get(id).expect("tier id exists in graph");
            let current_args = working_args.get(id).expect("working args present").clone();

            let duplicate_of = kept_this_tier.iter().find(|existing| {
                let existing_node = kept.get(*existing).expect("kept node present");
                existing_node.function_id == node.function_id
                    && equivalent_args(&existing_node.args, &current_args)
            }).cloned();

            match duplicate_of {
                Some(keeper) => {
                    dropped.insert(id.clone());
                    multiplex.entry(keeper.clone()).or_default().push(id.clone());

                    let keeper_cost = kept.get(&keeper).unwrap().compute_cost;
                    kept.get_mut(&keeper).unwrap().compute_cost = keeper_cost.max(node.compute_cost);

                    if let Some(consumers) = successors.get(id) {
                        for consumer in consumers.clone() {
                            let consumer_args = working_args.get(&consumer).cloned().unwrap_or_else(|| {
                                graph.get(&consumer).expect("consumer exists").args.clone()
                            });
                            let dup = id.clone();
                            let keeper_for_closure = keeper.clone();
                            let relabelled = relabel_dependencies(
                                &consumer_args,
                                &|producer: &TaskId| {
                                    if *producer == dup { Some(keeper_for_closure.clone()) } else { None }
                                },
                                &|producer: &TaskId| producer.clone(),
                            );
                            working_args.insert(consumer, relabelled);
                        }
                    }
                }
                None => {
                    kept_this_tier.push(id.clone());
                    kept.insert(
                        id.clone(),
                        TaskNode {
                            function_id: node.function_id.clone(),
                            func: node.func.clone(),
                            args: current_args,
                            compute_cost: node.compute_cost,
                        },
                    );
                }
            }
        }

        for id in &tier {
            processed.insert(id.clone());
            if let Some(consumers) = successors.get(id) {
                for consumer in consumers {
                    if let Some(set) = remaining_preds.get_mut(consumer) {
                        set.remove(id);
                    }
                }
            }
        }
    }

    let mut reduced = Graph::new();
    for id in &all_ids {
        if !dropped.contains(id) {
            reduced.insert(id.clone(), kept.remove(id).expect("kept node present"));
        }
    }

    ReducedGraph { graph: reduced, multiplex }
}

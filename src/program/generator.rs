// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::graph::{successors, Graph, Multiplex, TaskFn};
use crate::model::{relabel_dependencies, Args, TaskId};
use crate::program::idmap::{apply_multiplex, apply_output_filter, IdMap, IdMapEntry};
use crate::schedule::Schedule;

/// A single step of a worker's program (§4.4). Args on `Task` are already
/// relabelled to local step indices within this same worker's program.
#[derive(Clone)]
pub enum Step {
    Task { function_id: String, func: TaskFn, args: Args<usize> },
    Send { to_worker: usize, source_index: usize },
    Receive { from_worker: usize },
}

pub type Program = Vec<Step>;

pub struct GeneratedPrograms {
    pub programs: Vec<Program>,
    pub idmaps: Vec<IdMap>,
}

struct PendingReceive {
    producer: TaskId,
    producer_worker: usize,
    producer_finish: f64,
    local_consumers: Vec<TaskId>,
}

/// Build per-worker programs and parallel IdMaps from a reduced graph and its
/// schedule (§4.4): provision the channel fabric implicitly via `(from, to)`
/// worker pairs, walk the schedule in finish-time order flushing due receives
/// and emitting tasks and sends, then apply the multiplex and output-task
/// passes.
pub fn generate_task_lists(
    reduced: &Graph,
    schedule: &Schedule,
    multiplex: &Multiplex,
    worker_count: usize,
    output_tasks: Option<&HashSet<TaskId>>,
) -> GeneratedPrograms {
    let succ = successors(reduced);

    let mut slots: Vec<(TaskId, usize, f64, f64)> = schedule
        .placements
        .iter()
        .map(|(id, p)| (id.clone(), p.worker, p.start, p.finish))
        .collect();
    slots.sort_by(|a, b| {
        a.3.partial_cmp(&b.3)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
            .then(a.0.cmp(&b.0))
    });

    let mut programs: Vec<Program> = (0..worker_count).map(|_| Vec::new()).collect();
    let mut idmaps: Vec<IdMap> = (0..worker_count).map(|_| Vec::new()).collect();
    let mut local_index: Vec<HashMap<TaskId, usize>> = (0..worker_count).map(|_| HashMap::new()).collect();
    let mut pending: Vec<Vec<PendingReceive>> = (0..worker_count).map(|_| Vec::new()).collect();

    for (task, worker, start, finish) in slots {
        flush_due_receives(worker, start, &mut pending, &mut programs, &mut idmaps, &mut local_index);

        let node = reduced.get(&task).expect("scheduled task exists in reduced graph");
        let worker_index = &local_index[worker];
        let local_args = relabel_dependencies(
            &node.args,
            &|producer: &TaskId| worker_index.get(producer).copied(),
            &|producer: &TaskId| {
                panic!(
                    "program generation reached task '{task}' before its predecessor '{producer}' was resolved on worker {worker}"
                )
            },
        );

        let task_index = programs[worker].len();
        programs[worker].push(Step::Task {
            function_id: node.function_id.clone(),
            func: node.func.clone(),
            args: local_args,
        });
        idmaps[worker].push(IdMapEntry::Task(vec![task.clone()]));
        local_index[worker].insert(task.clone(), task_index);

        if let Some(consumers) = succ.get(&task) {
            let mut by_worker: BTreeMap<usize, Vec<TaskId>> = BTreeMap::new();
            for consumer in consumers {
                if let Some(placement) = schedule.placements.get(consumer) {
                    if placement.worker != worker {
                        by_worker.entry(placement.worker).or_default().push(consumer.clone());
                    }
                }
            }

            for (target_worker, local_consumers) in by_worker {
                programs[worker].push(Step::Send { to_worker: target_worker, source_index: task_index });
                idmaps[worker].push(IdMapEntry::Communication(vec![task.clone()], local_consumers.clone()));
                pending[target_worker].push(PendingReceive {
                    producer: task.clone(),
                    producer_worker: worker,
                    producer_finish: finish,
                    local_consumers,
                });
            }
        }
    }

    for idmap in idmaps.iter_mut() {
        apply_multiplex(idmap, multiplex);
    }

    if let Some(output_tasks) = output_tasks {
        for idmap in idmaps.iter_mut() {
            apply_output_filter(idmap, output_tasks);
        }
    }

    GeneratedPrograms { programs, idmaps }
}

fn flush_due_receives(
    worker: usize,
    start: f64,
    pending: &mut [Vec<PendingReceive>],
    programs: &mut [Program],
    idmaps: &mut [IdMap],
    local_index: &mut [HashMap<TaskId, usize>],
) {
    let due: Vec<PendingReceive> = {
        let queue = &mut pending[worker];
        let mut due = Vec::new();
        let mut remaining = Vec::new();
        for entry in queue.drain(..) {
            if entry.producer_finish < start {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        *queue = remaining;
        due
    };

    for entry in due {
        let index = programs[worker].len();
        programs[worker].push(Step::Receive { from_worker: entry.producer_worker });
        idmaps[worker]
            .push(IdMapEntry::Communication(vec![entry.producer.clone()], entry.local_consumers.clone()));
        local_index[worker].insert(entry.producer, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TaskNode;
    use crate::model::{Dependency, TaskValue};
    use crate::schedule::plan;
    use std::sync::Arc;

    fn node(args: crate::model::GraphArgs, cost: f64) -> TaskNode {
        TaskNode { function_id: "f".into(), func: Arc::new(|v: TaskValue| Ok(v)), args, compute_cost: cost }
    }

    #[test]
    fn cross_worker_dependency_produces_matched_send_and_receive() {
        let mut g = Graph::new();
        g.insert(TaskId::from(0_i64), node(Args::value(1_i64), 1.0));
        g.insert(
            TaskId::from(1_i64),
            node(Args::Dependency(Dependency::whole(TaskId::from(0_i64))), 1.0),
        );

        let planned = plan(&g, 2).unwrap();
        let generated = generate_task_lists(&planned.reduced, &planned.schedule, &planned.multiplex, 2, None);

        let producer_worker = planned.schedule.placements[&TaskId::from(0_i64)].worker;
        let consumer_worker = planned.schedule.placements[&TaskId::from(1_i64)].worker;

        if producer_worker != consumer_worker {
            let has_send = generated.programs[producer_worker]
                .iter()
                .any(|s| matches!(s, Step::Send { to_worker, .. } if *to_worker == consumer_worker));
            let has_receive = generated.programs[consumer_worker]
                .iter()
                .any(|s| matches!(s, Step::Receive { from_worker } if *from_worker == producer_worker));
            assert!(has_send);
            assert!(has_receive);
        }
    }

    #[test]
    fn output_task_filter_nulls_unrequested_entries() {
        let mut g = Graph::new();
        g.insert(TaskId::from(0_i64), node(Args::value(1_i64), 1.0));
        g.insert(TaskId::from(1_i64), node(Args::value(2_i64), 1.0));

        let planned = plan(&g, 1).unwrap();
        let mut wanted = HashSet::new();
        wanted.insert(TaskId::from(0_i64));

        let generated =
            generate_task_lists(&planned.reduced, &planned.schedule, &planned.multiplex, 1, Some(&wanted));

        let task_entries: Vec<&IdMapEntry> = generated.idmaps[0]
            .iter()
            .filter(|e| matches!(e, IdMapEntry::Task(_) | IdMapEntry::Null))
            .collect();
        assert!(task_entries.iter().any(|e| matches!(e, IdMapEntry::Task(ids) if ids.contains(&TaskId::from(0_i64)))));
        assert!(task_entries.iter().any(|e| matches!(e, IdMapEntry::Null)));
    }
}

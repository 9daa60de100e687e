// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The three external entry points (§6): a Planner entry point that turns a
//! graph into per-worker programs, an Executor entry point that runs those
//! programs and shapes their results, and a Convenience entry point that
//! chains the two for callers who don't need the intermediate plan.

use std::collections::BTreeMap;

use crate::config::RunOptions;
use crate::exec::{collect_costs, execute, fold_results, inflate, ExecutionOutput, ResultView};
use crate::failure::{Diagnostic, PlanningError};
use crate::graph::{Graph, Multiplex};
use crate::model::TaskId;
use crate::observability::messages::planner::{CostsKeyCollision, PlanningCompleted, PlanningStarted};
use crate::observability::messages::StructuredLog;
use crate::program::{generate_task_lists, IdMap, Program};
use crate::schedule::{plan, Schedule};

/// Output of the planner entry point: everything the executor entry point
/// needs to run and shape results, plus the planning intermediates a caller
/// might want to inspect (e.g. for telemetry or debugging).
pub struct PlanOutput {
    pub reduced: Graph,
    pub multiplex: Multiplex,
    pub schedule: Schedule,
    pub programs: Vec<Program>,
    pub idmaps: Vec<IdMap>,
}

/// Planner entry point (§6): duplicate elimination, upward-rank list
/// scheduling, and program generation, in that order.
pub fn plan_graph(graph: &Graph, options: &RunOptions) -> Result<PlanOutput, PlanningError> {
    let worker_count = options.worker_count.get();
    PlanningStarted { task_count: graph.len(), worker_count }.log();

    let planned = plan(graph, worker_count)?;
    PlanningCompleted {
        reduced_task_count: planned.reduced.len(),
        duplicates_removed: planned.multiplex.values().map(|dupes| dupes.len()).sum(),
    }
    .log();

    let generated = generate_task_lists(
        &planned.reduced,
        &planned.schedule,
        &planned.multiplex,
        worker_count,
        options.output_tasks.as_ref(),
    );

    Ok(PlanOutput {
        reduced: planned.reduced,
        multiplex: planned.multiplex,
        schedule: planned.schedule,
        programs: generated.programs,
        idmaps: generated.idmaps,
    })
}

/// Executor entry point (§6): run every worker's program, fold the results
/// back through the IdMaps, optionally inflate tuple ids and attach cost
/// telemetry, and raise the `costs`-name-collision diagnostic from §4.5 when
/// a real task happens to be named "costs".
pub fn run_programs(plan: &PlanOutput, options: &RunOptions) -> ExecutionOutput {
    let step_results = execute(plan.programs.clone(), options.timeout);
    let folded = fold_results(&plan.idmaps, &step_results);

    let mut diagnostics = Vec::new();
    let results = if options.inflate {
        ResultView::Inflated(inflate_with_collision_check(&folded, &mut diagnostics))
    } else {
        ResultView::Plain(folded.clone())
    };

    let costs = if options.costs {
        Some(collect_costs(&plan.reduced, &plan.schedule, &plan.multiplex, &plan.idmaps, &step_results))
    } else {
        None
    };

    ExecutionOutput { results, costs, diagnostics }
}

/// Convenience entry point (§6): plan then run in one call, for callers who
/// don't need the intermediate plan.
pub fn run_graph(graph: &Graph, options: &RunOptions) -> Result<ExecutionOutput, PlanningError> {
    let planned = plan_graph(graph, options)?;
    Ok(run_programs(&planned, options))
}

/// Inflate a folded result map, raising a [`Diagnostic`] whenever a task is
/// literally named "costs" and would otherwise collide with the reserved
/// `costs` sub-mapping once both are surfaced on the same result object.
/// Per §4.5, the colliding key becomes "costs_0", "costs_1", … — counting up
/// until a free name is found, in case a prior rename already claimed one.
fn inflate_with_collision_check(
    folded: &BTreeMap<TaskId, crate::model::TaskValue>,
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeMap<String, crate::model::TaskValue> {
    let mut inflated = inflate(folded);
    if let Some(value) = inflated.remove("costs") {
        let mut renamed = "costs_0".to_string();
        let mut n = 0_u32;
        while inflated.contains_key(&renamed) {
            n += 1;
            renamed = format!("costs_{n}");
        }
        CostsKeyCollision { original_key: "costs", renamed_key: &renamed }.log();
        diagnostics.push(Diagnostic::costs_key_collision("costs", &renamed));
        inflated.insert(renamed, value);
    }
    inflated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TaskNode;
    use crate::model::{Args, Dependency, TaskValue};
    use std::num::NonZeroUsize;
    use std::sync::Arc;

    fn node(function_id: &str, args: crate::model::GraphArgs, cost: f64) -> TaskNode {
        TaskNode { function_id: function_id.into(), func: Arc::new(|v: TaskValue| Ok(v)), args, compute_cost: cost }
    }

    #[test]
    fn run_graph_runs_a_two_task_chain_on_one_worker() {
        let mut g = Graph::new();
        g.insert(TaskId::from(0_i64), node("f", Args::value(2_i64), 1.0));
        g.insert(
            TaskId::from(1_i64),
            node("f", Args::Dependency(Dependency::whole(TaskId::from(0_i64))), 1.0),
        );

        let options = RunOptions::default();
        let output = run_graph(&g, &options).unwrap();
        match output.results {
            ResultView::Plain(results) => {
                assert_eq!(results.get(&TaskId::from(1_i64)), Some(&TaskValue::Int(2)));
            }
            other => panic!("expected a plain result view, got {other:?}"),
        }
    }

    #[test]
    fn inflate_option_renames_a_task_literally_named_costs() {
        let mut g = Graph::new();
        g.insert(TaskId::from("costs"), node("f", Args::value(9_i64), 1.0));

        let options = RunOptions::default().inflate(true);
        let output = run_graph(&g, &options).unwrap();
        assert_eq!(output.diagnostics.len(), 1);
        match output.results {
            ResultView::Inflated(fields) => {
                assert_eq!(fields.get("costs_0"), Some(&TaskValue::Int(9)));
                assert!(!fields.contains_key("costs"));
            }
            other => panic!("expected an inflated result view, got {other:?}"),
        }
    }

    #[test]
    fn costs_option_attaches_per_task_telemetry() {
        let mut g = Graph::new();
        g.insert(TaskId::from(0_i64), node("f", Args::value(2_i64), 1.0));

        let options = RunOptions::default().worker_count(NonZeroUsize::new(1).unwrap()).costs(true);
        let output = run_graph(&g, &options).unwrap();
        assert!(output.costs.unwrap().contains_key(&TaskId::from(0_i64)));
    }

    #[test]
    fn plan_graph_reports_missing_predecessor() {
        let mut g = Graph::new();
        g.insert(
            TaskId::from(0_i64),
            node("f", Args::Dependency(Dependency::whole(TaskId::from("ghost"))), 1.0),
        );

        let options = RunOptions::default();
        assert!(matches!(plan_graph(&g, &options), Err(PlanningError::MissingPredecessor { .. })));
    }
}

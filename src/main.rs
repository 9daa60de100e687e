// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::num::NonZeroUsize;
use std::sync::Arc;

use the_dagwood::config::RunOptions;
use the_dagwood::graph::{Graph, TaskNode};
use the_dagwood::model::{Args, Dependency, TaskId, TaskValue};
use the_dagwood::run::run_graph;
use the_dagwood::exec::ResultView;

/// A small end-to-end demo: three independent squares, fed into one `sum`
/// task, planned and run across a handful of workers. There is no file
/// format, wire protocol, or CLI here (§6) — this just exercises the
/// convenience entry point the way a caller embedding the crate would.
fn main() {
    tracing_subscriber::fmt::init();

    let square: the_dagwood::graph::TaskFn = Arc::new(|v: TaskValue| match v {
        TaskValue::Int(n) => Ok(TaskValue::Int(n * n)),
        other => Ok(other),
    });

    let sum: the_dagwood::graph::TaskFn = Arc::new(|v: TaskValue| match v {
        TaskValue::Seq(items) => {
            let total: i64 = items
                .into_iter()
                .map(|item| match item {
                    TaskValue::Int(n) => n,
                    _ => 0,
                })
                .sum();
            Ok(TaskValue::Int(total))
        }
        other => Ok(other),
    });

    let mut graph = Graph::new();
    graph.insert(
        TaskId::from(0_i64),
        TaskNode { function_id: "square".into(), func: square.clone(), args: Args::value(2_i64), compute_cost: 1.0 },
    );
    graph.insert(
        TaskId::from(1_i64),
        TaskNode { function_id: "square".into(), func: square.clone(), args: Args::value(3_i64), compute_cost: 1.0 },
    );
    graph.insert(
        TaskId::from(2_i64),
        TaskNode { function_id: "square".into(), func: square, args: Args::value(4_i64), compute_cost: 1.0 },
    );
    graph.insert(
        TaskId::from("total"),
        TaskNode {
            function_id: "sum".into(),
            func: sum,
            args: Args::Seq(vec![
                Args::Dependency(Dependency::whole(TaskId::from(0_i64))),
                Args::Dependency(Dependency::whole(TaskId::from(1_i64))),
                Args::Dependency(Dependency::whole(TaskId::from(2_i64))),
            ]),
            compute_cost: 1.0,
        },
    );

    let options = RunOptions::default().worker_count(NonZeroUsize::new(3).unwrap());
    match run_graph(&graph, &options) {
        Ok(output) => match output.results {
            ResultView::Plain(results) => {
                for (id, value) in &results {
                    println!("{id} = {value:?}");
                }
            }
            ResultView::Inflated(fields) => {
                for (key, value) in &fields {
                    println!("{key} = {value:?}");
                }
            }
        },
        Err(err) => eprintln!("planning failed: {err}"),
    }
}

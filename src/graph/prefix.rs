// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::graph::task_node::{Graph, TaskNode};
use crate::model::{relabel_dependencies, IdAtom, TaskId};

/// Rewrite every task ID in `graph` by prepending `prefix_atom`, and rewrite
/// every dependency's producer to match, so a sub-graph can be composed into a
/// larger one without its IDs colliding with the caller's own (§6, Prefix
/// utility; grounded in the reference `prefix`/`prefix_dependencies` helpers
/// that rewrite a graph's keys and its dependency producers together).
pub fn prefix(graph: &Graph, prefix_atom: impl Into<IdAtom>) -> Graph {
    let atom = prefix_atom.into();
    let mut out = Graph::new();
    for (id, node) in graph.iter() {
        let prefixed_id = id.with_prefix(atom.clone());
        let prefixed_args = relabel_dependencies(
            &node.args,
            &|producer: &TaskId| Some(producer.with_prefix(atom.clone())),
            &|producer: &TaskId| producer.clone(),
        );
        out.insert(
            prefixed_id,
            TaskNode {
                function_id: node.function_id.clone(),
                func: node.func.clone(),
                args: prefixed_args,
                compute_cost: node.compute_cost,
            },
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Args, Dependency, TaskValue};
    use std::sync::Arc;

    fn node(args: crate::model::GraphArgs) -> TaskNode {
        TaskNode { function_id: "f".into(), func: Arc::new(|v: TaskValue| Ok(v)), args, compute_cost: 1.0 }
    }

    #[test]
    fn prefix_rewrites_ids_and_dependency_producers_together() {
        let mut g = Graph::new();
        g.insert(TaskId::from(0_i64), node(Args::value(1_i64)));
        g.insert(
            TaskId::from(1_i64),
            node(Args::Dependency(Dependency::whole(TaskId::from(0_i64)))),
        );

        let prefixed = prefix(&g, "outer");

        let expected_producer = TaskId::from(0_i64).with_prefix("outer");
        let expected_consumer = TaskId::from(1_i64).with_prefix("outer");

        assert!(prefixed.contains(&expected_producer));
        let consumer_node = prefixed.get(&expected_consumer).unwrap();
        match &consumer_node.args {
            Args::Dependency(dep) => assert_eq!(dep.producer, expected_producer),
            _ => panic!("expected dependency arg"),
        }
    }

    #[test]
    fn double_prefix_is_unwrappable_to_single_prefix() {
        let mut g = Graph::new();
        g.insert(TaskId::from(0_i64), node(Args::value(1_i64)));

        let once = prefix(&g, "a");
        let twice = prefix(&once, "b");

        let id = twice.ids().next().unwrap().clone();
        assert_eq!(id.drop_first().unwrap(), TaskId::from(0_i64).with_prefix("a"));
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::failure::TaskFailure;
use crate::model::{GraphArgs, TaskId, TaskValue};

/// A task's function body. Task functions receive the fully expanded argument
/// tree as a single `TaskValue` rather than being invoked with separate
/// positional/keyword conventions: Rust has no variadic or keyword-argument
/// calling convention to dispatch on, so the shape information the original
/// design used to choose an invocation style (mapping -> kwargs, sequence ->
/// positional, scalar -> single positional) is preserved structurally in the
/// `TaskValue` the function receives and pattern-matches itself.
pub type TaskFn = Arc<dyn Fn(TaskValue) -> Result<TaskValue, TaskFailure> + Send + Sync>;

/// A single node of the computation graph: `TaskID -> (Function, Args, ComputeCost)`.
#[derive(Clone)]
pub struct TaskNode {
    /// Caller-supplied stable identity for the function, used by duplicate
    /// elimination (§9: "Rust closures have no portable identity to compare by").
    pub function_id: String,
    pub func: TaskFn,
    pub args: GraphArgs,
    pub compute_cost: f64,
}

impl fmt::Debug for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("function_id", &self.function_id)
            .field("args", &self.args)
            .field("compute_cost", &self.compute_cost)
            .finish()
    }
}

/// The user-supplied computation graph. Backed by an `IndexMap` rather than a
/// `HashMap` so that tier-by-tier duplicate elimination (§4.2) can iterate tasks
/// in deterministic input order, as the spec requires.
#[derive(Clone, Debug, Default)]
pub struct Graph(pub IndexMap<TaskId, TaskNode>);

impl Graph {
    pub fn new() -> Self {
        Graph(IndexMap::new())
    }

    pub fn insert(&mut self, id: TaskId, node: TaskNode) {
        self.0.insert(id, node);
    }

    pub fn get(&self, id: &TaskId) -> Option<&TaskNode> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TaskId> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskId, &TaskNode)> {
        self.0.iter()
    }
}

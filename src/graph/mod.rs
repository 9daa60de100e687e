// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graph preprocessing (C2): the task graph itself, duplicate elimination with
//! multiplexing, derived successor/predecessor/cost views, and the `prefix`
//! utility for composing sub-graphs.

mod dedup;
mod prefix;
mod task_node;
mod views;

pub use dedup::{remove_duplicates, Multiplex, ReducedGraph};
pub use prefix::prefix;
pub use task_node::{Graph, TaskFn, TaskNode};
pub use views::{comm_costs, compute_costs, predecessors, successors};

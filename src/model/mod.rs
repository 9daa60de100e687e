// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Argument model & traversal (C1): task identifiers, the opaque value carried at
//! argument and result positions, and the recursive `Args` tree with its
//! traversal operations.

pub mod args;
pub mod task_id;
pub mod value;

pub use args::{
    apply_key_path, apply_key_step, equivalent_args, list_communication_costs,
    list_dependencies, map_leaves, relabel_dependencies, Args, Dependency, GraphArgs,
    GraphDependency, KeyPath, KeyStep,
};
pub use task_id::{IdAtom, TaskId};
pub use value::TaskValue;

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Program generator (C4): rewrites a global schedule into per-worker ordered
//! programs of task/send/receive steps, with a parallel IdMap recording what
//! each step's result means once execution collects results.

mod generator;
mod idmap;

pub use generator::{generate_task_lists, GeneratedPrograms, Program, Step};
pub use idmap::{IdMap, IdMapEntry};

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution engine (C5): spawns worker threads, exchanges results over
//! rendezvous channels, propagates failures and timeouts, and shapes the
//! final results.
//!
//! Worker 0 runs on the caller's own thread; every other worker gets its own
//! OS thread (`std::thread::spawn`) and its own slice of the channel fabric —
//! the spec's "child process" per §4.5/§5 is realized here as an isolated OS
//! thread rather than a forked process, since task bodies are in-process
//! closures (`TaskFn`) with no portable way to cross a process boundary
//! without a serialization layer the spec doesn't otherwise require (see
//! DESIGN.md).

mod channels;
mod costs;
mod engine;
mod results;
mod worker;

pub use costs::{collect_costs, CostEntry};
pub use engine::{execute, ExecutionOutput, ResultView};
pub use results::{fold_results, inflate};
pub use worker::StepResult;

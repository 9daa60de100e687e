// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the execution engine (C5): worker fan-out, collection,
//! and per-worker timeouts.

use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// Execution started: every worker's program is about to run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionStarted {
    pub worker_count: usize,
}

impl Display for ExecutionStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Starting execution across {} workers", self.worker_count)
    }
}

impl StructuredLog for ExecutionStarted {
    fn log(&self) {
        tracing::info!(worker_count = self.worker_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("execution", span_name = name, worker_count = self.worker_count)
    }
}

/// Every worker's program has been run or collected, successfully or not.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionCompleted {
    pub worker_count: usize,
    pub elapsed: Duration,
}

impl Display for ExecutionCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Execution across {} workers completed in {:?}",
            self.worker_count, self.elapsed
        )
    }
}

impl StructuredLog for ExecutionCompleted {
    fn log(&self) {
        tracing::info!(
            worker_count = self.worker_count,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            worker_count = self.worker_count,
            elapsed = ?self.elapsed,
        )
    }
}

/// A worker did not finish (or could not be collected) before the deadline;
/// its remaining steps were synthesized as timeouts (§5 "Cancellation / timeouts").
///
/// # Log Level
/// `warn!` - Recoverable condition the caller should be aware of
pub struct WorkerTimedOut {
    pub worker_index: usize,
}

impl Display for WorkerTimedOut {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Worker {} timed out during collection", self.worker_index)
    }
}

impl StructuredLog for WorkerTimedOut {
    fn log(&self) {
        tracing::warn!(worker_index = self.worker_index, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("worker_timed_out", span_name = name, worker_index = self.worker_index)
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the planner (C2/C3): duplicate elimination and
//! upward-rank list scheduling lifecycle events.

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::model::TaskId;
use crate::observability::messages::StructuredLog;

/// Planning started for a graph of the given size.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PlanningStarted {
    pub task_count: usize,
    pub worker_count: usize,
}

impl Display for PlanningStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Planning {} tasks across {} workers",
            self.task_count, self.worker_count
        )
    }
}

impl StructuredLog for PlanningStarted {
    fn log(&self) {
        tracing::info!(task_count = self.task_count, worker_count = self.worker_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "planning",
            span_name = name,
            task_count = self.task_count,
            worker_count = self.worker_count,
        )
    }
}

/// Planning completed: duplicate elimination and list scheduling both ran.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PlanningCompleted {
    pub reduced_task_count: usize,
    pub duplicates_removed: usize,
}

impl Display for PlanningCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Planning completed: {} tasks remain after removing {} duplicates",
            self.reduced_task_count, self.duplicates_removed
        )
    }
}

impl StructuredLog for PlanningCompleted {
    fn log(&self) {
        tracing::info!(
            reduced_task_count = self.reduced_task_count,
            duplicates_removed = self.duplicates_removed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "planning_completed",
            span_name = name,
            reduced_task_count = self.reduced_task_count,
            duplicates_removed = self.duplicates_removed,
        )
    }
}

/// A single task was placed on a worker's timeline.
///
/// # Log Level
/// `debug!` - High-volume per-task event, not an operational milestone
pub struct TaskScheduled<'a> {
    pub task: &'a TaskId,
    pub worker: usize,
    pub start: f64,
    pub finish: f64,
}

impl Display for TaskScheduled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Scheduled '{}' on worker {} [{}, {}]",
            self.task, self.worker, self.start, self.finish
        )
    }
}

impl StructuredLog for TaskScheduled<'_> {
    fn log(&self) {
        tracing::debug!(
            task = %self.task,
            worker = self.worker,
            start = self.start,
            finish = self.finish,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "task_scheduled",
            span_name = name,
            task = %self.task,
            worker = self.worker,
        )
    }
}

/// A task is literally named "costs"; its cost telemetry was moved aside to
/// avoid colliding with the `costs` sub-mapping in the result view (§4.5).
///
/// # Log Level
/// `warn!` - Recoverable condition the caller should be aware of
pub struct CostsKeyCollision<'a> {
    pub original_key: &'a str,
    pub renamed_key: &'a str,
}

impl Display for CostsKeyCollision<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task named \"{}\" collides with the costs sub-mapping; renamed to \"{}\"",
            self.original_key, self.renamed_key
        )
    }
}

impl StructuredLog for CostsKeyCollision<'_> {
    fn log(&self) {
        tracing::warn!(
            original_key = self.original_key,
            renamed_key = self.renamed_key,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "costs_key_collision",
            span_name = name,
            original_key = self.original_key,
            renamed_key = self.renamed_key,
        )
    }
}

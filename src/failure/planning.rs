// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::model::TaskId;

/// Fatal, planning-time failures (§7 "Fatality"): configuration or
/// graph-structural problems the planner does not attempt to recover from.
/// Mirrors the existing split between `ValidationError` (config-time, fatal)
/// and the run-time error taxonomy in [`crate::failure::TaskFailure`].
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("task '{task}' depends on '{missing}', which does not appear in the graph")]
    MissingPredecessor { task: TaskId, missing: TaskId },

    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("graph contains a cycle reachable from '{from}'; upward rank cannot terminate")]
    CyclicGraph { from: TaskId },

    #[error("no idle slot of sufficient length exists on any worker for task '{task}'")]
    UnplaceableTask { task: TaskId },
}

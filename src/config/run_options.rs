// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::model::TaskId;

/// In-process run configuration (§6, §10.3). There is no file format, wire
/// protocol, or CLI for this: the core explicitly excludes those surfaces, so
/// `RunOptions` is constructed and passed directly by the caller.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub worker_count: NonZeroUsize,
    pub output_tasks: Option<HashSet<TaskId>>,
    pub timeout: Option<Duration>,
    pub inflate: bool,
    pub costs: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            worker_count: NonZeroUsize::new(1).expect("1 is non-zero"),
            output_tasks: None,
            timeout: None,
            inflate: false,
            costs: false,
        }
    }
}

impl RunOptions {
    pub fn worker_count(mut self, worker_count: NonZeroUsize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn output_tasks(mut self, output_tasks: HashSet<TaskId>) -> Self {
        self.output_tasks = Some(output_tasks);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn inflate(mut self, inflate: bool) -> Self {
        self.inflate = inflate;
        self
    }

    pub fn costs(mut self, costs: bool) -> Self {
        self.costs = costs;
        self
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::TaskId;

/// A single worker's ordered, non-overlapping set of placements (§4.3
/// invariant). Kept sorted by `start` as entries are inserted.
#[derive(Clone, Debug, Default)]
pub struct Timeline(pub Vec<(TaskId, f64, f64)>);

impl Timeline {
    pub fn new() -> Self {
        Timeline(Vec::new())
    }

    /// The earliest idle slot whose start is `>= earliest_start` and whose
    /// length is `>= duration`, including the open tail after the last
    /// placement (§4.3 step 3).
    pub fn find_idle_slot(&self, earliest_start: f64, duration: f64) -> f64 {
        let mut cursor = 0.0_f64;
        for (_, start, finish) in &self.0 {
            let candidate = earliest_start.max(cursor);
            if candidate + duration <= *start {
                return candidate;
            }
            cursor = cursor.max(*finish);
        }
        earliest_start.max(cursor)
    }

    /// Finish time already committed to `id`, if it has been placed here.
    pub fn finish_of(&self, id: &TaskId) -> Option<f64> {
        self.0.iter().find(|(placed, _, _)| placed == id).map(|(_, _, finish)| *finish)
    }

    pub fn insert(&mut self, id: TaskId, start: f64, finish: f64) {
        let pos = self.0.partition_point(|(_, s, _)| *s <= start);
        self.0.insert(pos, (id, start, finish));
    }

    pub fn last_finish(&self) -> f64 {
        self.0.iter().map(|(_, _, finish)| *finish).fold(0.0, f64::max)
    }
}

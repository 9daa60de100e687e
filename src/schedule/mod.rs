// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Upward-rank & list scheduler (C3): critical-path priority ranking, per-worker
//! idle-slot timelines, and the EFT placement loop that assigns every task a
//! worker and time slot.

mod planner;
mod rank;
mod timeline;

pub use planner::{plan, Placement, PlannerOutput, Schedule};
pub use rank::upward_rank;
pub use timeline::Timeline;

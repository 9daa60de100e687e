// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error & timeout taxonomy (C6).
//!
//! Every kind named in §7 is a first-class value embeddable in a
//! [`crate::model::TaskValue`] via `TaskValue::Failure`, not an unwound exception.
//! `TaskFailure` implements `std::error::Error` via `thiserror`, following the
//! same derive-based idiom already used for WASM backend errors; equality is
//! `(kind, args)` as required by §4.6, which is why `#[error(...)]` messages are
//! kept separate from the `PartialEq` derive below rather than baked into it.

mod diagnostic;
mod planning;
mod task;

pub use diagnostic::Diagnostic;
pub use planning::PlanningError;
pub use task::{CallSite, TaskFailure};

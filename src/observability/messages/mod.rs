// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging and distributed tracing.
//!
//! Each message type implements:
//!
//! * `Display` - Human-readable output (supports future i18n)
//! * `StructuredLog` - Machine-readable fields + OpenTelemetry span creation
//!
//! # Organization
//!
//! * `planner` - duplicate elimination, ranking & scheduling events
//! * `executor` - worker-thread lifecycle and timeout events
//!
//! # Usage
//!
//! ```rust
//! use the_dagwood::observability::messages::{StructuredLog, planner::PlanningStarted};
//!
//! let msg = PlanningStarted { task_count: 5, worker_count: 2 };
//!
//! // Emits both human-readable message AND structured fields
//! msg.log();
//!
//! // Create a span with the message's fields as attributes
//! let span = msg.span("planning");
//! let _guard = span.enter();
//! ```

pub mod executor;
pub mod planner;

use tracing::Span;

/// Messages that support structured logging and distributed tracing.
pub trait StructuredLog {
    /// Emit a log event with structured fields, at whatever level the
    /// message's own semantics call for (info, warn, ...).
    fn log(&self);

    /// Create an OpenTelemetry span with this message's fields as attributes.
    fn span(&self, name: &str) -> Span;
}

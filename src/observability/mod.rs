// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with `Display` trait
//! implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Maintain Single Responsibility Principle (SRP)
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::planner` - duplicate elimination, ranking & scheduling events
//! * `messages::executor` - worker-thread lifecycle and timeout events
//!
//! # Usage
//!
//! ```rust
//! use the_dagwood::observability::messages::{StructuredLog, planner::PlanningStarted};
//!
//! let msg = PlanningStarted { task_count: 5, worker_count: 2 };
//! msg.log();
//! ```

pub mod messages;

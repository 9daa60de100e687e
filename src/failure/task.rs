// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Call-site information captured when a user task raises, analogous to the
/// "message_with_traceback" the reference implementation attaches to `Err`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub function_id: String,
    pub note: Option<String>,
}

impl CallSite {
    pub fn new(function_id: impl Into<String>) -> Self {
        CallSite { function_id: function_id.into(), note: None }
    }
}

/// First-class error value (§7). Every variant transmits across the worker
/// boundary via `Serialize`/`Deserialize`, never losing its kind, message or
/// call-site.
#[derive(Clone, Debug, Error, Serialize, Deserialize)]
pub enum TaskFailure {
    /// A user task raised. Captures the exception kind, its arguments, and the
    /// call site.
    #[error("{kind}: {message}")]
    TaskError {
        kind: String,
        message: String,
        args: Vec<String>,
        call_site: Option<CallSite>,
    },

    /// A predecessor produced an error value; generated automatically by
    /// `expandArgs` (§4.1). One level of nested `DependencyError` is flattened,
    /// never stacked.
    #[error("{message}")]
    DependencyError { message: String },

    /// A Receive deadline elapsed, or a child's result-collection deadline
    /// elapsed. `worker_index` is `None` for an in-worker receive timeout.
    #[error("{message}")]
    TaskTimeoutError {
        message: String,
        worker_index: Option<usize>,
    },
}

impl TaskFailure {
    pub fn task_error(kind: impl Into<String>, message: impl Into<String>, call_site: Option<CallSite>) -> Self {
        let message = message.into();
        TaskFailure::TaskError {
            kind: kind.into(),
            args: vec![message.clone()],
            message,
            call_site,
        }
    }

    /// `DependencyError.default(err)`: wraps `err` (itself a failure value),
    /// flattening one level of message if `err` is already a `DependencyError`.
    pub fn dependency_error(inner: &TaskFailure) -> Self {
        let message = match inner {
            TaskFailure::DependencyError { message } => message.clone(),
            other => format!(
                "A dependency raised {} with the message \"{}\"",
                other.kind(),
                other.short_message()
            ),
        };
        TaskFailure::DependencyError { message }
    }

    /// `TaskTimeoutError.default(worker_index)`.
    pub fn timeout(worker_index: Option<usize>) -> Self {
        let message = match worker_index {
            None => "Receive task timed out".to_string(),
            Some(k) => format!("Timeout when collecting results from process {k}"),
        };
        TaskFailure::TaskTimeoutError { message, worker_index }
    }

    pub fn kind(&self) -> &str {
        match self {
            TaskFailure::TaskError { kind, .. } => kind,
            TaskFailure::DependencyError { .. } => "DependencyError",
            TaskFailure::TaskTimeoutError { .. } => "TaskTimeoutError",
        }
    }

    pub fn short_message(&self) -> String {
        match self {
            TaskFailure::TaskError { message, .. } => message.clone(),
            TaskFailure::DependencyError { message } => message.clone(),
            TaskFailure::TaskTimeoutError { message, .. } => message.clone(),
        }
    }

    fn comparison_args(&self) -> Vec<String> {
        match self {
            TaskFailure::TaskError { args, .. } => args.clone(),
            TaskFailure::DependencyError { message } => vec![message.clone()],
            TaskFailure::TaskTimeoutError { message, worker_index } => {
                vec![message.clone(), format!("{worker_index:?}")]
            }
        }
    }
}

/// Equality on error values is `(kind, args)` per §4.6 — not call-site, which
/// varies run to run.
impl PartialEq for TaskFailure {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.comparison_args() == other.comparison_args()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_error_flattens_nested_dependency_error() {
        let inner = TaskFailure::timeout(None);
        let wrapped_once = TaskFailure::dependency_error(&inner);
        let wrapped_twice = TaskFailure::dependency_error(&wrapped_once);
        // flattening: wrapping a DependencyError again keeps the same message,
        // it does not prefix "A dependency raised DependencyError with..."
        assert_eq!(wrapped_once.short_message(), wrapped_twice.short_message());
    }

    #[test]
    fn dependency_error_wraps_task_error_with_kind_and_message() {
        let inner = TaskFailure::task_error("ZeroDivisionError", "division by zero", None);
        let wrapped = TaskFailure::dependency_error(&inner);
        assert_eq!(
            wrapped.short_message(),
            "A dependency raised ZeroDivisionError with the message \"division by zero\""
        );
    }

    #[test]
    fn timeout_default_distinguishes_worker_index() {
        assert_eq!(TaskFailure::timeout(None).short_message(), "Receive task timed out");
        assert_eq!(
            TaskFailure::timeout(Some(2)).short_message(),
            "Timeout when collecting results from process 2"
        );
    }

    #[test]
    fn equality_ignores_call_site() {
        let a = TaskFailure::task_error("E", "m", Some(CallSite::new("f1")));
        let b = TaskFailure::task_error("E", "m", Some(CallSite::new("f2")));
        assert_eq!(a, b);
    }
}

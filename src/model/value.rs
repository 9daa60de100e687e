// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The opaque value carried at argument leaves and produced by task results.
//!
//! The distilled spec treats task arguments and results as "any hashable/orderable
//! opaque value". A systems language has no such universal duck type, so this
//! implementation follows §9's guidance ("model duck-typed leaves as a tagged sum
//! type with a generic opaque payload") and closes the value space over the shapes
//! the rest of the spec actually needs: scalars, ordered sequences, mappings, a
//! distinguished "record" shape for the attribute-fallback rule of `expandArgs`
//! (§4.1), and a failure value (§7) so that errors can flow through the same
//! channel as ordinary results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::failure::TaskFailure;

/// A task argument or task result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TaskValue {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Seq(Vec<TaskValue>),
    Map(BTreeMap<String, TaskValue>),
    /// An attribute-bearing value distinct from `Map`: exists so `expandArgs`'s
    /// "string key, fall back to named field" rule (§4.1) has something to fall
    /// back to when a `Map` lookup fails or the value isn't a `Map` at all.
    Record(BTreeMap<String, TaskValue>),
    /// A captured failure, carried as a first-class value rather than unwound
    /// (§7: "Errors become result values, not control-flow exits").
    Failure(Box<TaskFailure>),
}

impl TaskValue {
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskValue::Failure(_))
    }

    pub fn as_failure(&self) -> Option<&TaskFailure> {
        match self {
            TaskValue::Failure(f) => Some(f),
            _ => None,
        }
    }

    pub fn int(value: i64) -> Self {
        TaskValue::Int(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        TaskValue::Text(value.into())
    }

    /// Fetch a single index/slice/key step off this value, per §4.1's "step
    /// semantics of a single key": try direct indexing, then — for string keys —
    /// fall back to a named field on a `Record`. Anything else fails.
    pub fn get_index(&self, index: usize) -> Option<&TaskValue> {
        match self {
            TaskValue::Seq(items) => items.get(index),
            _ => None,
        }
    }

    pub fn get_slice(&self, start: usize, end: usize) -> Option<TaskValue> {
        match self {
            TaskValue::Seq(items) => {
                let end = end.min(items.len());
                if start > end {
                    None
                } else {
                    Some(TaskValue::Seq(items[start..end].to_vec()))
                }
            }
            _ => None,
        }
    }

    pub fn get_key(&self, key: &str) -> Option<&TaskValue> {
        match self {
            TaskValue::Map(fields) => fields.get(key).or_else(|| None),
            TaskValue::Record(fields) => fields.get(key),
            _ => None,
        }
    }
}

impl PartialEq for TaskValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TaskValue::Unit, TaskValue::Unit) => true,
            (TaskValue::Bool(a), TaskValue::Bool(b)) => a == b,
            (TaskValue::Int(a), TaskValue::Int(b)) => a == b,
            (TaskValue::Float(a), TaskValue::Float(b)) => a == b,
            (TaskValue::Text(a), TaskValue::Text(b)) => a == b,
            (TaskValue::Seq(a), TaskValue::Seq(b)) => a == b,
            (TaskValue::Map(a), TaskValue::Map(b)) => a == b,
            (TaskValue::Record(a), TaskValue::Record(b)) => a == b,
            (TaskValue::Failure(a), TaskValue::Failure(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for TaskValue {
    fn from(value: i64) -> Self {
        TaskValue::Int(value)
    }
}

impl From<f64> for TaskValue {
    fn from(value: f64) -> Self {
        TaskValue::Float(value)
    }
}

impl From<&str> for TaskValue {
    fn from(value: &str) -> Self {
        TaskValue::Text(value.to_string())
    }
}

impl From<Vec<TaskValue>> for TaskValue {
    fn from(value: Vec<TaskValue>) -> Self {
        TaskValue::Seq(value)
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Task identifiers.
//!
//! A `TaskId` is the hashable, orderable handle a caller uses to name a task in a
//! [`crate::graph::Graph`]. Plain identifiers are a single [`IdAtom`]; composite
//! identifiers (commonly used to namespace a family of generated tasks, e.g.
//! `("stats", 0)`) carry more than one atom and are "inflated" into nested mappings
//! at the result boundary (see [`crate::exec::results::inflate`]).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single component of a [`TaskId`]. Composite IDs such as `("stats", 0)` are
/// represented as two atoms rather than as a single opaque tuple value, so that
/// inflation and prefixing can operate on them structurally.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IdAtom {
    Int(i64),
    Text(String),
}

impl fmt::Display for IdAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdAtom::Int(n) => write!(f, "{n}"),
            IdAtom::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for IdAtom {
    fn from(value: i64) -> Self {
        IdAtom::Int(value)
    }
}

impl From<&str> for IdAtom {
    fn from(value: &str) -> Self {
        IdAtom::Text(value.to_string())
    }
}

impl From<String> for IdAtom {
    fn from(value: String) -> Self {
        IdAtom::Text(value)
    }
}

/// A task identifier: one atom for a plain ID, more than one for a tuple ID.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Vec<IdAtom>);

impl TaskId {
    pub fn new(atom: impl Into<IdAtom>) -> Self {
        TaskId(vec![atom.into()])
    }

    pub fn tuple(atoms: impl IntoIterator<Item = IdAtom>) -> Self {
        TaskId(atoms.into_iter().collect())
    }

    pub fn is_tuple(&self) -> bool {
        self.0.len() > 1
    }

    /// Prepend an atom, growing a plain ID into a 2-tuple or a tuple into a larger one.
    /// This is the rewrite `prefix()` applies to every ID in a graph (§6, Prefix utility).
    pub fn with_prefix(&self, prefix: impl Into<IdAtom>) -> TaskId {
        let mut atoms = Vec::with_capacity(self.0.len() + 1);
        atoms.push(prefix.into());
        atoms.extend(self.0.iter().cloned());
        TaskId(atoms)
    }

    /// Drop the leading atom. Used by `inflate` to recurse into the remaining
    /// components of a tuple ID after consuming the outermost key.
    pub fn drop_first(&self) -> Option<TaskId> {
        if self.0.len() <= 1 {
            None
        } else {
            Some(TaskId(self.0[1..].to_vec()))
        }
    }

    pub fn first(&self) -> &IdAtom {
        &self.0[0]
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            write!(f, "{}", self.0[0])
        } else {
            write!(f, "(")?;
            for (i, atom) in self.0.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{atom}")?;
            }
            write!(f, ")")
        }
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        TaskId::new(value)
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        TaskId::new(value)
    }
}

impl From<(&str, i64)> for TaskId {
    fn from(value: (&str, i64)) -> Self {
        TaskId::tuple([IdAtom::from(value.0), IdAtom::from(value.1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_plain_id() {
        assert_eq!(TaskId::new("a").to_string(), "a");
        assert_eq!(TaskId::new(3).to_string(), "3");
    }

    #[test]
    fn display_tuple_id() {
        let id = TaskId::tuple([IdAtom::from("stats"), IdAtom::from(0)]);
        assert_eq!(id.to_string(), "(stats, 0)");
    }

    #[test]
    fn with_prefix_grows_by_one_atom() {
        let plain = TaskId::new("x");
        let prefixed = plain.with_prefix("outer");
        assert_eq!(prefixed, TaskId::tuple([IdAtom::from("outer"), IdAtom::from("x")]));

        let tuple = TaskId::tuple([IdAtom::from("stats"), IdAtom::from(0)]);
        let prefixed_tuple = tuple.with_prefix("outer");
        assert_eq!(
            prefixed_tuple,
            TaskId::tuple([IdAtom::from("outer"), IdAtom::from("stats"), IdAtom::from(0)])
        );
    }

    #[test]
    fn double_prefix_then_unwrap_matches_single_prefix() {
        // prefix(prefix(g, a), b) == prefix(g, b) after one a-level unwrap (I-8 round trip)
        let base = TaskId::new("x");
        let double = base.with_prefix("a").with_prefix("b");
        let single = base.with_prefix("b");
        assert_eq!(double.drop_first().unwrap().0[0], IdAtom::from("a"));
        assert_eq!(TaskId(double.0[1..].to_vec()).0.len() - 1, single.0.len() - 1);
    }

    #[test]
    fn drop_first_on_plain_id_is_none() {
        assert!(TaskId::new("x").drop_first().is_none());
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Argument model & traversal (C1).
//!
//! `Args` is generic over the producer-reference type `R`: at the graph level a
//! dependency's producer is a [`crate::model::TaskId`]; after the program generator
//! relabels dependencies to local step indices (§4.4), the producer becomes a plain
//! `usize`. Everything here — `map_leaves`, `list_dependencies`,
//! `list_communication_costs`, `equivalent_args` — is shape-level traversal that
//! doesn't care which flavor of producer reference it's carrying, so it's written
//! once against `R` rather than duplicated between the graph and program layers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::task_id::TaskId;
use crate::model::value::TaskValue;

/// A single step of a key path: index into a sequence, slice a sequence, or look
/// up a named key (with attribute fallback — see `TaskValue::get_key`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyStep {
    Index(usize),
    Slice(usize, usize),
    Key(String),
}

/// `None` means "use the whole producer result"; `Some(steps)` applies each step
/// in order, covering both the "single key" and "ordered sequence of keys" cases
/// of §3's Dependency definition.
pub type KeyPath = Option<Vec<KeyStep>>;

/// A handle to another task's result. Equality and hashing are defined on
/// `(producer, key)` only — `comm_cost` is planning metadata (§3).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dependency<R> {
    pub producer: R,
    pub key: KeyPath,
    pub comm_cost: f64,
}

impl<R> Dependency<R> {
    pub fn new(producer: R, key: KeyPath, comm_cost: f64) -> Self {
        Dependency { producer, key, comm_cost }
    }

    pub fn whole(producer: R) -> Self {
        Dependency { producer, key: None, comm_cost: 0.0 }
    }
}

impl<R: PartialEq> PartialEq for Dependency<R> {
    fn eq(&self, other: &Self) -> bool {
        self.producer == other.producer && self.key == other.key
    }
}

impl<R: Eq> Eq for Dependency<R> {}

/// Task arguments: a single opaque value, a dependency handle, an ordered
/// sequence, or a mapping. Dependency is a leaf even though it is itself a
/// triple (§4.1).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Args<R> {
    Value(TaskValue),
    Dependency(Dependency<R>),
    Seq(Vec<Args<R>>),
    Map(BTreeMap<String, Args<R>>),
}

impl<R> Args<R> {
    pub fn value(value: impl Into<TaskValue>) -> Self {
        Args::Value(value.into())
    }
}

/// `mapLeaves`: rebuild the same shape, applying `f` to every `Value` or
/// `Dependency` leaf.
pub fn map_leaves<R: Clone>(args: &Args<R>, f: &mut impl FnMut(&Args<R>) -> Args<R>) -> Args<R> {
    match args {
        Args::Value(_) | Args::Dependency(_) => f(args),
        Args::Seq(items) => Args::Seq(items.iter().map(|item| map_leaves(item, f)).collect()),
        Args::Map(fields) => Args::Map(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), map_leaves(v, f)))
                .collect(),
        ),
    }
}

/// `listDependencies`: the set of producers referenced anywhere in `args`.
pub fn list_dependencies<R: Clone + Ord>(args: &Args<R>) -> BTreeSet<R> {
    let mut out = BTreeSet::new();
    collect_dependencies(args, &mut out);
    out
}

fn collect_dependencies<R: Clone + Ord>(args: &Args<R>, out: &mut BTreeSet<R>) {
    match args {
        Args::Value(_) => {}
        Args::Dependency(dep) => {
            out.insert(dep.producer.clone());
        }
        Args::Seq(items) => items.iter().for_each(|item| collect_dependencies(item, out)),
        Args::Map(fields) => fields.values().for_each(|item| collect_dependencies(item, out)),
    }
}

/// `listCommunicationCosts`: for each unique producer, the maximum declared
/// `commCost` across all of its occurrences (§4.1 rationale: a predecessor's
/// result crosses the wire at most once per consuming worker).
pub fn list_communication_costs<R: Clone + Ord>(args: &Args<R>) -> BTreeMap<R, f64> {
    let mut out: BTreeMap<R, f64> = BTreeMap::new();
    collect_comm_costs(args, &mut out);
    out
}

fn collect_comm_costs<R: Clone + Ord>(args: &Args<R>, out: &mut BTreeMap<R, f64>) {
    match args {
        Args::Value(_) => {}
        Args::Dependency(dep) => {
            let entry = out.entry(dep.producer.clone()).or_insert(dep.comm_cost);
            if dep.comm_cost > *entry {
                *entry = dep.comm_cost;
            }
        }
        Args::Seq(items) => items.iter().for_each(|item| collect_comm_costs(item, out)),
        Args::Map(fields) => fields.values().for_each(|item| collect_comm_costs(item, out)),
    }
}

/// `equivalentArgs`: structural equality. `Seq`/`Map` containers require equal
/// length/key-set before comparing elementwise; the tolerant zip-based fallback
/// the reference implementation uses is for opaque array-like *leaves* raising
/// on direct equality, which this model has no need of since `TaskValue`
/// equality never raises.
pub fn equivalent_args<R: PartialEq>(a: &Args<R>, b: &Args<R>) -> bool {
    match (a, b) {
        (Args::Value(x), Args::Value(y)) => x == y,
        (Args::Dependency(x), Args::Dependency(y)) => x == y,
        (Args::Seq(xs), Args::Seq(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| equivalent_args(x, y))
        }
        (Args::Map(xs), Args::Map(ys)) => {
            xs.len() == ys.len()
                && xs.keys().all(|k| ys.contains_key(k))
                && xs.iter().all(|(k, v)| ys.get(k).map_or(false, |w| equivalent_args(v, w)))
        }
        _ => false,
    }
}

/// `relabelDependencies`: rewrite every dependency whose producer appears in
/// `map`, leaving key and comm_cost untouched. Used both by C2 (duplicate
/// elimination relabels `b -> a`) and by C4 (the program generator relabels
/// `TaskId -> local index`, which is why the output type can differ from the
/// input type).
pub fn relabel_dependencies<S, T: Clone>(
    args: &Args<S>,
    map: &dyn Fn(&S) -> Option<T>,
    default: &dyn Fn(&S) -> T,
) -> Args<T> {
    match args {
        Args::Value(v) => Args::Value(v.clone()),
        Args::Dependency(dep) => {
            let producer = map(&dep.producer).unwrap_or_else(|| default(&dep.producer));
            Args::Dependency(Dependency {
                producer,
                key: dep.key.clone(),
                comm_cost: dep.comm_cost,
            })
        }
        Args::Seq(items) => Args::Seq(
            items.iter().map(|item| relabel_dependencies(item, map, default)).collect(),
        ),
        Args::Map(fields) => Args::Map(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), relabel_dependencies(v, map, default)))
                .collect(),
        ),
    }
}

/// Apply a single key step to a value, per §4.1's "try index, fall back to named
/// field" rule.
pub fn apply_key_step(value: &TaskValue, step: &KeyStep) -> Option<TaskValue> {
    match step {
        KeyStep::Index(i) => value.get_index(*i).cloned(),
        KeyStep::Slice(start, end) => value.get_slice(*start, *end),
        KeyStep::Key(key) => value.get_key(key).cloned(),
    }
}

/// Apply a full key path to a value (§4.1: "None -> whole value; sequence ->
/// apply each step in order").
pub fn apply_key_path(value: &TaskValue, path: &KeyPath) -> Option<TaskValue> {
    match path {
        None => Some(value.clone()),
        Some(steps) => {
            let mut current = value.clone();
            for step in steps {
                current = apply_key_step(&current, step)?;
            }
            Some(current)
        }
    }
}

pub type GraphArgs = Args<TaskId>;
pub type GraphDependency = Dependency<TaskId>;

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(producer: &str, cost: f64) -> Args<TaskId> {
        Args::Dependency(Dependency::new(TaskId::from(producer), None, cost))
    }

    #[test]
    fn list_dependencies_descends_sequences_and_maps() {
        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), dep("p1", 1.0));
        let args: Args<TaskId> = Args::Seq(vec![Args::Map(fields), dep("p2", 2.0)]);
        let deps = list_dependencies(&args);
        assert_eq!(deps.len(), 2);
        assert!(deps.contains(&TaskId::from("p1")));
        assert!(deps.contains(&TaskId::from("p2")));
    }

    #[test]
    fn list_communication_costs_takes_max_per_producer() {
        let args: Args<TaskId> = Args::Seq(vec![dep("p1", 1.0), dep("p1", 5.0), dep("p1", 3.0)]);
        let costs = list_communication_costs(&args);
        assert_eq!(costs.get(&TaskId::from("p1")), Some(&5.0));
    }

    #[test]
    fn equivalent_args_rejects_sequences_of_unequal_length() {
        let a: Args<TaskId> = Args::Seq(vec![Args::value(1_i64)]);
        let b: Args<TaskId> = Args::Seq(vec![Args::value(1_i64), Args::value(2_i64)]);
        assert!(!equivalent_args(&a, &b));
        assert!(!equivalent_args(&b, &a));
    }

    #[test]
    fn equivalent_args_compares_maps_by_key_set() {
        let mut a = BTreeMap::new();
        a.insert("x".to_string(), Args::<TaskId>::value(1_i64));
        let mut b = BTreeMap::new();
        b.insert("x".to_string(), Args::<TaskId>::value(1_i64));
        assert!(equivalent_args(&Args::Map(a), &Args::Map(b)));
    }

    #[test]
    fn equivalent_args_rejects_mismatched_dependency_key() {
        let a: Args<TaskId> = Args::Dependency(Dependency::new(
            TaskId::from("p"),
            Some(vec![KeyStep::Key("x".to_string())]),
            0.0,
        ));
        let b: Args<TaskId> = Args::Dependency(Dependency::new(TaskId::from("p"), None, 0.0));
        assert!(!equivalent_args(&a, &b));
    }

    #[test]
    fn relabel_dependencies_rewrites_matched_producers_only() {
        let args: Args<TaskId> = Args::Seq(vec![dep("p1", 1.0), dep("p2", 2.0)]);
        let relabelled = relabel_dependencies(
            &args,
            &|producer: &TaskId| {
                if *producer == TaskId::from("p1") {
                    Some(TaskId::from("kept"))
                } else {
                    None
                }
            },
            &|producer: &TaskId| producer.clone(),
        );
        let deps = list_dependencies(&relabelled);
        assert!(deps.contains(&TaskId::from("kept")));
        assert!(deps.contains(&TaskId::from("p2")));
    }

    #[test]
    fn apply_key_path_none_returns_whole_value() {
        let value = TaskValue::int(42);
        assert_eq!(apply_key_path(&value, &None), Some(TaskValue::int(42)));
    }

    #[test]
    fn apply_key_path_sequence_applies_steps_in_order() {
        let mut inner = BTreeMap::new();
        inner.insert("values".to_string(), TaskValue::Seq(vec![TaskValue::int(1), TaskValue::int(3), TaskValue::int(5)]));
        let value = TaskValue::Map(inner);
        let path: KeyPath = Some(vec![KeyStep::Key("values".to_string()), KeyStep::Index(2)]);
        assert_eq!(apply_key_path(&value, &path), Some(TaskValue::int(5)));
    }
}

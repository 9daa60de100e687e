// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::model::{TaskId, TaskValue};
use crate::program::{IdMap, IdMapEntry};

use super::worker::StepResult;

/// Fold every worker's step results through its IdMap into the user-facing
/// `TaskID -> Value` map (§4.5 "Result shaping"). A `Communication` entry
/// contributes nothing — it only moved a value between workers. A multiplexed
/// `Task` entry assigns the same value to every id in its group.
pub fn fold_results(idmaps: &[IdMap], results: &[Vec<StepResult>]) -> BTreeMap<TaskId, TaskValue> {
    let mut out = BTreeMap::new();
    for (idmap, worker_results) in idmaps.iter().zip(results.iter()) {
        for (entry, result) in idmap.iter().zip(worker_results.iter()) {
            if let IdMapEntry::Task(ids) = entry {
                for id in ids {
                    out.insert(id.clone(), result.value.clone());
                }
            }
        }
    }
    out
}

/// Expand every tuple TaskID into nested mappings keyed by successive tuple
/// components (§4.5 "Inflate", §6). A plain (single-atom) id becomes a
/// top-level key unchanged. This only ever inspects TaskIDs — it never
/// recurses into a user return value that happens to contain tuples of its
/// own (§8 "does not recurse into keys that are already tuples inside user
/// return values").
pub fn inflate(results: &BTreeMap<TaskId, TaskValue>) -> BTreeMap<String, TaskValue> {
    let mut out: BTreeMap<String, TaskValue> = BTreeMap::new();
    for (id, value) in results {
        insert_inflated(&mut out, id, value.clone());
    }
    out
}

fn insert_inflated(fields: &mut BTreeMap<String, TaskValue>, id: &TaskId, value: TaskValue) {
    let head = id.first().to_string();
    match id.drop_first() {
        None => {
            fields.insert(head, value);
        }
        Some(rest) => {
            let nested = fields.entry(head).or_insert_with(|| TaskValue::Map(BTreeMap::new()));
            if let TaskValue::Map(nested_fields) = nested {
                insert_inflated(nested_fields, &rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result(value: TaskValue) -> StepResult {
        StepResult { value, elapsed: Duration::from_millis(0) }
    }

    #[test]
    fn task_entry_feeds_all_of_its_multiplex_group() {
        let idmaps = vec![vec![IdMapEntry::Task(vec![TaskId::from(0_i64), TaskId::from(1_i64)])]];
        let results = vec![vec![result(TaskValue::Int(4))]];

        let folded = fold_results(&idmaps, &results);
        assert_eq!(folded.get(&TaskId::from(0_i64)), Some(&TaskValue::Int(4)));
        assert_eq!(folded.get(&TaskId::from(1_i64)), Some(&TaskValue::Int(4)));
    }

    #[test]
    fn communication_entries_are_not_reported() {
        let idmaps = vec![vec![IdMapEntry::Communication(vec![TaskId::from(0_i64)], vec![TaskId::from(1_i64)])]];
        let results = vec![vec![result(TaskValue::Int(4))]];

        let folded = fold_results(&idmaps, &results);
        assert!(folded.is_empty());
    }

    #[test]
    fn inflate_groups_tuple_ids_by_their_leading_atom() {
        let mut flat = BTreeMap::new();
        flat.insert(TaskId::from(("stats", 0_i64)), TaskValue::Int(1));
        flat.insert(TaskId::from(("stats", 1_i64)), TaskValue::Int(2));
        flat.insert(TaskId::from("total"), TaskValue::Int(3));

        let inflated = inflate(&flat);
        assert_eq!(inflated.get("total"), Some(&TaskValue::Int(3)));
        match inflated.get("stats") {
            Some(TaskValue::Map(group)) => {
                assert_eq!(group.get("0"), Some(&TaskValue::Int(1)));
                assert_eq!(group.get("1"), Some(&TaskValue::Int(2)));
            }
            other => panic!("expected a nested map under 'stats', got {other:?}"),
        }
    }
}

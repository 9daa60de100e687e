// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::graph::Multiplex;
use crate::model::TaskId;

/// What a single program step's result maps back to once execution collects
/// results (§4.4, §4.5). A `Task` entry names the task(s) whose value the
/// step's result becomes — more than one after the multiplex pass reattaches
/// duplicates that were merged away in C2. A `Communication` entry names the
/// producer being carried across the wire and the local consumers still
/// waiting on it; it contributes nothing to the final result map itself.
/// `Null` marks a step whose result the caller asked not to see via
/// `outputTasks`, even though the step still runs.
#[derive(Clone, Debug, PartialEq)]
pub enum IdMapEntry {
    Task(Vec<TaskId>),
    Communication(Vec<TaskId>, Vec<TaskId>),
    Null,
}

pub type IdMap = Vec<IdMapEntry>;

/// Expand any id that was merged away by duplicate elimination into
/// `[id, ...its duplicates]` (§4.4 multiplex pass). A no-op for ids that
/// were never deduplicated.
pub fn expand_multiplex(ids: &[TaskId], multiplex: &Multiplex) -> Vec<TaskId> {
    ids.iter()
        .flat_map(|id| match multiplex.get(id) {
            Some(dupes) => {
                let mut expanded = vec![id.clone()];
                expanded.extend(dupes.iter().cloned());
                expanded
            }
            None => vec![id.clone()],
        })
        .collect()
}

pub fn apply_multiplex(idmap: &mut IdMap, multiplex: &Multiplex) {
    for entry in idmap.iter_mut() {
        match entry {
            IdMapEntry::Task(ids) => *ids = expand_multiplex(ids, multiplex),
            IdMapEntry::Communication(producer, recipients) => {
                *producer = expand_multiplex(producer, multiplex);
                *recipients = expand_multiplex(recipients, multiplex);
            }
            IdMapEntry::Null => {}
        }
    }
}

/// Rewrite every entry against the caller's requested output set (§4.4
/// output-task filter): a `Task` entry keeps only the requested ids (dropping
/// to `Null` if none match); a `Communication` entry is kept whole if its
/// producer is itself requested, otherwise its recipient list is narrowed to
/// the requested set (and the entry dropped if that narrows to nothing).
pub fn apply_output_filter(idmap: &mut IdMap, output_tasks: &HashSet<TaskId>) {
    for entry in idmap.iter_mut() {
        let replacement = match entry {
            IdMapEntry::Task(ids) => {
                let kept: Vec<TaskId> = ids.iter().filter(|id| output_tasks.contains(id)).cloned().collect();
                if kept.is_empty() {
                    IdMapEntry::Null
                } else {
                    IdMapEntry::Task(kept)
                }
            }
            IdMapEntry::Communication(producer, recipients) => {
                if producer.iter().any(|id| output_tasks.contains(id)) {
                    continue;
                }
                let kept: Vec<TaskId> =
                    recipients.iter().filter(|id| output_tasks.contains(id)).cloned().collect();
                if kept.is_empty() {
                    IdMapEntry::Null
                } else {
                    IdMapEntry::Communication(producer.clone(), kept)
                }
            }
            IdMapEntry::Null => continue,
        };
        *entry = replacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn multiplex_expands_task_entries() {
        let mut idmap: IdMap = vec![IdMapEntry::Task(vec![TaskId::from(0_i64)])];
        let mut multiplex: Multiplex = HashMap::new();
        multiplex.insert(TaskId::from(0_i64), vec![TaskId::from(1_i64), TaskId::from(6_i64)]);

        apply_multiplex(&mut idmap, &multiplex);
        assert_eq!(
            idmap[0],
            IdMapEntry::Task(vec![TaskId::from(0_i64), TaskId::from(1_i64), TaskId::from(6_i64)])
        );
    }

    #[test]
    fn output_filter_keeps_communication_whole_when_producer_requested() {
        let mut idmap: IdMap =
            vec![IdMapEntry::Communication(vec![TaskId::from(0_i64)], vec![TaskId::from(1_i64)])];
        let mut output: HashSet<TaskId> = HashSet::new();
        output.insert(TaskId::from(0_i64));

        apply_output_filter(&mut idmap, &output);
        assert_eq!(
            idmap[0],
            IdMapEntry::Communication(vec![TaskId::from(0_i64)], vec![TaskId::from(1_i64)])
        );
    }

    #[test]
    fn output_filter_narrows_then_drops_communication_recipients() {
        let mut idmap: IdMap =
            vec![IdMapEntry::Communication(vec![TaskId::from(0_i64)], vec![TaskId::from(1_i64)])];
        let mut output: HashSet<TaskId> = HashSet::new();
        output.insert(TaskId::from(2_i64));

        apply_output_filter(&mut idmap, &output);
        assert_eq!(idmap[0], IdMapEntry::Null);
    }

    #[test]
    fn output_filter_drops_unrequested_task_entries() {
        let mut idmap: IdMap = vec![IdMapEntry::Task(vec![TaskId::from(0_i64)])];
        let output: HashSet<TaskId> = HashSet::new();
        apply_output_filter(&mut idmap, &output);
        assert_eq!(idmap[0], IdMapEntry::Null);
    }
}

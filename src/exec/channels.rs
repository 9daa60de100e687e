// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::model::TaskValue;

pub type Outbox = HashMap<usize, Sender<TaskValue>>;
pub type Inbox = HashMap<usize, Receiver<TaskValue>>;

/// Provision two one-directional channels per unordered worker pair (§4.4
/// "Per-worker channel fabric"): one `i -> j`, one `j -> i`. Zero-capacity
/// (`bounded(0)`) channels give true rendezvous semantics (§4.5, §5): a Send
/// blocks until the peer's matching Receive is ready for it. Returns, per
/// worker, its outgoing senders keyed by destination worker and its incoming
/// receivers keyed by source worker.
pub fn build_fabric(worker_count: usize) -> (Vec<Outbox>, Vec<Inbox>) {
    let mut outboxes: Vec<Outbox> = (0..worker_count).map(|_| HashMap::new()).collect();
    let mut inboxes: Vec<Inbox> = (0..worker_count).map(|_| HashMap::new()).collect();

    for from in 0..worker_count {
        for to in 0..worker_count {
            if from == to {
                continue;
            }
            let (tx, rx) = bounded(0);
            outboxes[from].insert(to, tx);
            inboxes[to].insert(from, rx);
        }
    }

    (outboxes, inboxes)
}

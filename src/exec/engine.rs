// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::bounded;

use crate::failure::{Diagnostic, TaskFailure};
use crate::model::{TaskId, TaskValue};
use crate::observability::messages::executor::{ExecutionCompleted, ExecutionStarted, WorkerTimedOut};
use crate::observability::messages::StructuredLog;
use crate::program::Program;

use super::channels::build_fabric;
use super::costs::CostEntry;
use super::worker::{run_worker, StepResult};

/// The user-facing result map, before or after inflation (§4.5 "Inflate").
#[derive(Clone, Debug)]
pub enum ResultView {
    Plain(BTreeMap<TaskId, TaskValue>),
    Inflated(BTreeMap<String, TaskValue>),
}

/// The executor entry point's output (§6): results, optional cost telemetry,
/// and any non-fatal diagnostics raised along the way (§7 `UserWarning`).
#[derive(Clone, Debug)]
pub struct ExecutionOutput {
    pub results: ResultView,
    pub costs: Option<BTreeMap<TaskId, CostEntry>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run every worker's program (§4.5, §5). Worker 0's program runs on the
/// caller's own thread, exactly as the spec's "the master is simultaneously a
/// worker (index 0) and the coordinator"; every other worker gets its own OS
/// thread and its own slice of the channel fabric (§5 "Worker isolation model
/// (resolved)"), so one worker's suspension never blocks another's. Each
/// spawned worker reports its finished program back over a one-shot
/// completion channel; the master's `recv_timeout` on that channel realizes
/// "the master's per-child collection deadline" — a worker that never
/// finishes (or whose thread dies before sending) is treated exactly like a
/// dead child process and its whole program is synthesized as timeouts.
pub fn execute(programs: Vec<Program>, deadline: Option<Duration>) -> Vec<Vec<StepResult>> {
    let worker_count = programs.len();
    ExecutionStarted { worker_count }.log();
    let started = Instant::now();

    let (mut outboxes, mut inboxes) = build_fabric(worker_count);
    let mut programs = programs.into_iter();

    // Reverse so `pop()` yields workers in ascending order without disturbing
    // the still-to-be-spawned tail of the vectors.
    outboxes.reverse();
    inboxes.reverse();

    let master_program = programs.next().expect("plan_graph always produces at least one program");
    let master_outbox = outboxes.pop().expect("fabric sized to worker_count");
    let master_inbox = inboxes.pop().expect("fabric sized to worker_count");

    let mut collectors: Vec<(usize, crossbeam_channel::Receiver<Vec<StepResult>>, usize)> = Vec::new();
    for (offset, program) in programs.enumerate() {
        let worker_index = offset + 1;
        let program_len = program.len();
        let outbox = outboxes.pop().expect("fabric sized to worker_count");
        let inbox = inboxes.pop().expect("fabric sized to worker_count");
        let (done_tx, done_rx) = bounded(1);

        thread::Builder::new()
            .name(format!("dag-worker-{worker_index}"))
            .spawn(move || {
                let results = run_worker(program, outbox, inbox, deadline);
                let _ = done_tx.send(results);
            })
            .expect("spawning a worker thread");

        collectors.push((worker_index, done_rx, program_len));
    }

    let master_results = run_worker(master_program, master_outbox, master_inbox, deadline);

    let mut all_results: Vec<Vec<StepResult>> = vec![Vec::new(); worker_count];
    all_results[0] = master_results;

    for (worker_index, done_rx, program_len) in collectors {
        let collected = match deadline {
            Some(d) => done_rx.recv_timeout(d),
            None => done_rx.recv().map_err(|_| crossbeam_channel::RecvTimeoutError::Disconnected),
        };
        all_results[worker_index] = match collected {
            Ok(results) => results,
            Err(_) => {
                WorkerTimedOut { worker_index }.log();
                synthesize_timeouts(program_len, worker_index)
            }
        };
    }

    ExecutionCompleted { worker_count, elapsed: started.elapsed() }.log();
    all_results
}

/// A child that dies (or never responds within the deadline) before the
/// master collects it produces a full program-length list of timeout errors
/// (§4.5 "Master collection", §5 "Cancellation / timeouts").
fn synthesize_timeouts(program_len: usize, worker_index: usize) -> Vec<StepResult> {
    (0..program_len)
        .map(|_| StepResult {
            value: TaskValue::Failure(Box::new(TaskFailure::timeout(Some(worker_index)))),
            elapsed: Duration::ZERO,
        })
        .collect()
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::{Duration, Instant};

use crate::failure::{CallSite, TaskFailure};
use crate::graph::TaskFn;
use crate::model::{apply_key_step, Args, KeyStep, TaskValue};
use crate::program::{Program, Step};

use super::channels::{Inbox, Outbox};

/// One program step's outcome: its result value (possibly a captured failure,
/// §7) and how long the step took to resolve.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub value: TaskValue,
    pub elapsed: Duration,
}

/// Run one worker's program to completion, strictly in order (§5: "strictly
/// sequential within a worker"). A step's own failure never aborts the
/// program — it becomes that step's result value, and later steps observe it
/// the same way they'd observe any other result (§7 "Propagation policy").
/// Runs on whatever thread calls it: the master's own thread for worker 0,
/// a dedicated OS thread for every other worker (§5 "Worker isolation model").
pub fn run_worker(program: Program, mut outbox: Outbox, mut inbox: Inbox, deadline: Option<Duration>) -> Vec<StepResult> {
    let mut results: Vec<StepResult> = Vec::with_capacity(program.len());

    for step in program.iter() {
        let started = Instant::now();
        let value = match step {
            Step::Task { function_id, func, args } => run_task_step(function_id, func, args, &results),
            Step::Send { to_worker, source_index } => {
                send_step(&mut outbox, *to_worker, results[*source_index].value.clone(), deadline)
            }
            Step::Receive { from_worker } => receive_step(&mut inbox, *from_worker, deadline),
        };
        results.push(StepResult { value, elapsed: started.elapsed() });
    }

    results
}

fn run_task_step(function_id: &str, func: &TaskFn, args: &Args<usize>, results: &[StepResult]) -> TaskValue {
    match expand_args(args, results) {
        Err(failure) => TaskValue::Failure(Box::new(failure)),
        Ok(expanded) => invoke(function_id, func, expanded),
    }
}

/// Invoke a task's function, converting any panic into a `TaskError` (§4.5
/// "Catch any exception raised by the invocation"). `func` already returns
/// `Result<TaskValue, TaskFailure>` for the ordinary failure path; the panic
/// guard only covers the case of a task body that aborts Rust's own way
/// instead of returning an `Err`.
fn invoke(function_id: &str, func: &TaskFn, expanded: TaskValue) -> TaskValue {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| func(expanded))) {
        Ok(Ok(value)) => value,
        Ok(Err(failure)) => TaskValue::Failure(Box::new(failure)),
        Err(panic) => TaskValue::Failure(Box::new(TaskFailure::task_error(
            "TaskPanic",
            panic_message(&panic),
            Some(CallSite::new(function_id)),
        ))),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked with a non-string payload".to_string()
    }
}

/// `expandArgs` (§4.1): replace every dependency leaf — already relabelled to
/// a local step index by the program generator (§4.4) — with its extracted
/// result. Fails with `DependencyError` the moment the producer's value, or
/// any value reached along a multi-step key path, is itself a failure.
fn expand_args(args: &Args<usize>, results: &[StepResult]) -> Result<TaskValue, TaskFailure> {
    match args {
        Args::Value(v) => Ok(v.clone()),
        Args::Dependency(dep) => extract(&results[dep.producer].value, &dep.key),
        Args::Seq(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(expand_args(item, results)?);
            }
            Ok(TaskValue::Seq(out))
        }
        Args::Map(fields) => {
            let mut out = std::collections::BTreeMap::new();
            for (k, v) in fields {
                out.insert(k.clone(), expand_args(v, results)?);
            }
            Ok(TaskValue::Map(out))
        }
    }
}

/// Apply a key path to a producer's value, erroring out as soon as a failure
/// is encountered at any point along the path — "None: whole value; sequence:
/// apply each step in order" (§4.1), with the error rule from the same
/// section layered on top.
fn extract(value: &TaskValue, path: &Option<Vec<KeyStep>>) -> Result<TaskValue, TaskFailure> {
    if let Some(failure) = value.as_failure() {
        return Err(TaskFailure::dependency_error(failure));
    }
    let Some(steps) = path else {
        return Ok(value.clone());
    };
    let mut current = value.clone();
    for step in steps {
        current = apply_key_step(&current, step)
            .ok_or_else(|| TaskFailure::task_error("KeyError", format!("key step {step:?} did not match"), None))?;
        if let Some(failure) = current.as_failure() {
            return Err(TaskFailure::dependency_error(failure));
        }
    }
    Ok(current)
}

/// A Send step's deadline matches Receive's (§5 "Cancellation / timeouts" —
/// resolved as `send_timeout` with the same duration as `recv_timeout`).
fn send_step(outbox: &mut Outbox, to_worker: usize, value: TaskValue, deadline: Option<Duration>) -> TaskValue {
    let sender = outbox.get(&to_worker).expect("channel fabric provisions every worker pair");
    let outcome = match deadline {
        Some(d) => sender.send_timeout(value.clone(), d).is_ok(),
        None => sender.send(value.clone()).is_ok(),
    };
    if outcome {
        value
    } else {
        TaskValue::Failure(Box::new(TaskFailure::timeout(None)))
    }
}

fn receive_step(inbox: &mut Inbox, from_worker: usize, deadline: Option<Duration>) -> TaskValue {
    let receiver = inbox.get(&from_worker).expect("channel fabric provisions every worker pair");
    let received = match deadline {
        Some(d) => receiver.recv_timeout(d).ok(),
        None => receiver.recv().ok(),
    };
    received.unwrap_or_else(|| TaskValue::Failure(Box::new(TaskFailure::timeout(None))))
}

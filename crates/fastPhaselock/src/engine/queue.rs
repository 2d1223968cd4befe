//! Queue strategy for combinatorial task counts.
//!
//! ## Purpose
//!
//! This module evaluates a lazily produced stream of pair tasks on a fixed
//! set of worker threads without materializing the whole task list. It is
//! used for adjacency matrices, where the number of tasks grows with the
//! square of the grid size.
//!
//! ## Design notes
//!
//! * **Bounded job queue**: A feeder thread fills a bounded channel while the
//!   workers consume it, so memory stays proportional to the queue depth.
//! * **Sentinels**: After the last real task the feeder appends one `Stop`
//!   per worker; each worker exits on its sentinel.
//! * **Explicit failures**: A panicking task becomes an error result. The
//!   coordinator then cancels the remaining work and reports the failure.
//! * **Bounded waits**: With a timeout configured, the coordinator gives up
//!   when no result arrives within it.
//! * **Detached threads**: Workers own their channel ends, the task function
//!   and the cancel flag, so a failure or timeout returns at once and leaves
//!   stuck workers behind.
//!
//! ## Invariants
//!
//! * The coordinator drains exactly `expected` results on success.
//! * On success all threads are joined before returning.
//! * After cancellation, workers skip queued tasks and exit once their
//!   running task ends.
//!
//! ## Non-goals
//!
//! * Tasks already running when a failure or timeout occurs are not
//!   interrupted; they finish in the background and their results are
//!   discarded.

// External dependencies
use core::sync::atomic::{AtomicBool, Ordering};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use log::error;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

// Export dependencies from phaselock crate
use phaselock::internals::engine::executor::PairTask;
use phaselock::internals::primitives::errors::PhaseLockError;

/// Jobs buffered per worker in the bounded queue.
pub const QUEUE_DEPTH: usize = 4;

// ============================================================================
// Messages
// ============================================================================

/// Item on the job channel.
enum Job<A> {
    /// A real task.
    Task(PairTask<A>),

    /// Shutdown sentinel; one per worker.
    Stop,
}

/// Item on the result channel.
type Outcome<R> = Result<(usize, usize, R), String>;

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}

/// Evaluate one pair, turning a panic into an error message.
fn evaluate<A, R, F>(task: PairTask<A>, f: &F) -> Outcome<R>
where
    F: Fn(A) -> R,
{
    let PairTask { i, j, args } = task;
    catch_unwind(AssertUnwindSafe(|| f(args)))
        .map(|value| (i, j, value))
        .map_err(|payload| format!("pair ({i}, {j}): {}", panic_message(payload)))
}

fn spawn_named<T, G>(name: String, body: G) -> Result<JoinHandle<T>, PhaseLockError>
where
    T: Send + 'static,
    G: FnOnce() -> T + Send + 'static,
{
    thread::Builder::new()
        .name(name)
        .spawn(body)
        .map_err(|e| PhaseLockError::WorkerFailure(format!("cannot start queue thread: {e}")))
}

// ============================================================================
// Queue Execution
// ============================================================================

/// Evaluate `f` on every task of the stream using `workers` threads.
///
/// Zero workers evaluates sequentially in the calling thread.
pub fn run_queue<A, R, I, F>(
    tasks: I,
    expected: usize,
    f: F,
    workers: usize,
    timeout: Option<Duration>,
) -> Result<Vec<(usize, usize, R)>, PhaseLockError>
where
    I: Iterator<Item = PairTask<A>> + Send + 'static,
    A: Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    if workers == 0 {
        return run_inline(tasks, expected, &f);
    }

    let (job_tx, job_rx) = bounded::<Job<A>>(workers * QUEUE_DEPTH);
    let (result_tx, result_rx) = unbounded::<Outcome<R>>();
    let cancel = Arc::new(AtomicBool::new(false));
    let f = Arc::new(f);

    let mut handles = Vec::with_capacity(workers + 1);
    let feeder_cancel = Arc::clone(&cancel);
    let started = spawn_workers(workers, &job_rx, &result_tx, &cancel, &f, &mut handles)
        .and_then(|()| {
            spawn_named("phaselock-feeder".to_string(), move || {
                feed(tasks, job_tx, workers, &feeder_cancel)
            })
        });
    drop(result_tx);
    drop(job_rx);

    match started {
        Ok(feeder) => handles.push(feeder),
        Err(e) => {
            cancel.store(true, Ordering::Relaxed);
            return Err(e);
        }
    }

    let outcome = drain_results(&result_rx, expected, timeout);

    // Skip whatever is still queued
    cancel.store(true, Ordering::Relaxed);

    match outcome {
        Ok(results) => {
            for handle in handles {
                handle.join().map_err(|_| {
                    PhaseLockError::WorkerFailure("queue thread panicked".to_string())
                })?;
            }
            Ok(results)
        }
        Err(e) => Err(e),
    }
}

fn spawn_workers<A, R, F>(
    workers: usize,
    job_rx: &Receiver<Job<A>>,
    result_tx: &Sender<Outcome<R>>,
    cancel: &Arc<AtomicBool>,
    f: &Arc<F>,
    handles: &mut Vec<JoinHandle<()>>,
) -> Result<(), PhaseLockError>
where
    A: Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    for w in 0..workers {
        let job_rx = job_rx.clone();
        let result_tx = result_tx.clone();
        let cancel = Arc::clone(cancel);
        let f = Arc::clone(f);
        let handle = spawn_named(format!("phaselock-queue-{w}"), move || {
            while let Ok(job) = job_rx.recv() {
                let task = match job {
                    Job::Stop => break,
                    Job::Task(task) => task,
                };
                if cancel.load(Ordering::Relaxed) {
                    continue;
                }
                if result_tx.send(evaluate(task, f.as_ref())).is_err() {
                    break;
                }
            }
        })?;
        handles.push(handle);
    }
    Ok(())
}

fn feed<A, I>(tasks: I, job_tx: Sender<Job<A>>, workers: usize, cancel: &AtomicBool)
where
    I: Iterator<Item = PairTask<A>>,
{
    for task in tasks {
        if cancel.load(Ordering::Relaxed) || job_tx.send(Job::Task(task)).is_err() {
            break;
        }
    }
    for _ in 0..workers {
        if job_tx.send(Job::Stop).is_err() {
            break;
        }
    }
}

/// Receive `expected` results, stopping at the first failure or timeout.
fn drain_results<R>(
    result_rx: &Receiver<Outcome<R>>,
    expected: usize,
    timeout: Option<Duration>,
) -> Result<Vec<(usize, usize, R)>, PhaseLockError> {
    let mut results = Vec::with_capacity(expected);
    while results.len() < expected {
        let received = match timeout {
            Some(limit) => result_rx.recv_timeout(limit),
            None => result_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(Ok(result)) => results.push(result),
            Ok(Err(message)) => {
                error!("queue worker task failed: {message}");
                return Err(PhaseLockError::WorkerFailure(message));
            }
            Err(RecvTimeoutError::Timeout) => {
                return Err(PhaseLockError::Timeout {
                    completed: results.len(),
                    expected,
                });
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(PhaseLockError::WorkerFailure(format!(
                    "workers stopped after {} of {expected} results",
                    results.len()
                )));
            }
        }
    }
    Ok(results)
}

/// Evaluate the stream in the calling thread.
fn run_inline<A, R, I, F>(
    tasks: I,
    expected: usize,
    f: &F,
) -> Result<Vec<(usize, usize, R)>, PhaseLockError>
where
    I: Iterator<Item = PairTask<A>>,
    F: Fn(A) -> R,
{
    let mut results = Vec::with_capacity(expected);
    for task in tasks {
        match evaluate(task, f) {
            Ok(result) => results.push(result),
            Err(message) => {
                error!("queue task failed: {message}");
                return Err(PhaseLockError::WorkerFailure(message));
            }
        }
    }

    if results.len() != expected {
        return Err(PhaseLockError::WorkerFailure(format!(
            "task stream produced {} of {expected} pairs",
            results.len()
        )));
    }
    Ok(results)
}

//! Background polling: a cancellable owned thread that re-runs the quiet
//! diff-and-report cycle at a fixed interval.
//!
//! The poller reports, it never commits: background observation must not
//! silently advance the persisted baseline.

use crate::engine::SnapshotEngine;
use crate::output::Reporter;
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Stop request shared with the polling thread.
struct StopSignal {
    requested: Mutex<bool>,
    wake: Condvar,
}

fn recover<'a, T>(
    result: Result<MutexGuard<'a, T>, std::sync::PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    result.unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// A cancellable background task that repeatedly reports changes.
///
/// States are Stopped and Running; `start` and `stop` are both idempotent.
/// The thread handle is owned here so shutdown is deterministic: `stop`
/// requests cooperative exit, wakes the interval wait, and joins the thread
/// before returning. An in-flight report cycle always completes; the stop
/// request takes effect at the next suspension boundary.
pub struct Poller {
    engine: Arc<SnapshotEngine>,
    reporter: Arc<dyn Reporter>,
    interval: Duration,
    running: Arc<AtomicBool>,
    signal: Arc<StopSignal>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Creates a poller in the Stopped state.
    #[must_use]
    pub fn new(engine: Arc<SnapshotEngine>, reporter: Arc<dyn Reporter>, interval: Duration) -> Self {
        Self {
            engine,
            reporter,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            signal: Arc::new(StopSignal {
                requested: Mutex::new(false),
                wake: Condvar::new(),
            }),
            handle: None,
        }
    }

    /// Whether the background task is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Transitions Stopped→Running. A no-op while already Running, so two
    /// consecutive starts never produce a second polling thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the background thread cannot be spawned.
    pub fn start(&mut self) -> Result<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("poller already running");
            return Ok(());
        }
        *recover(self.signal.requested.lock()) = false;

        let engine = Arc::clone(&self.engine);
        let reporter = Arc::clone(&self.reporter);
        let running = Arc::clone(&self.running);
        let signal = Arc::clone(&self.signal);
        let interval = self.interval;

        let handle = std::thread::Builder::new()
            .name("driftwatch-poller".to_string())
            .spawn(move || {
                debug!(interval_ms = interval.as_millis() as u64, "poller started");
                loop {
                    // One cycle never kills the loop; failures are logged
                    // and the next interval proceeds.
                    match engine.report(reporter.as_ref(), false) {
                        Ok(summary) => {
                            debug!(changes = summary.changes(), "poll cycle completed");
                        }
                        Err(e) => warn!(error = %e, "poll cycle failed"),
                    }

                    let guard = recover(signal.requested.lock());
                    let (stopped, _) = signal
                        .wake
                        .wait_timeout_while(guard, interval, |requested| !*requested)
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    if *stopped {
                        break;
                    }
                }
                running.store(false, Ordering::SeqCst);
                debug!("poller stopped");
            })
            .context("Failed to spawn poller thread")?;

        self.handle = Some(handle);
        Ok(())
    }

    /// Transitions Running→Stopped and waits for the background thread to
    /// finish. A no-op while already Stopped.
    pub fn stop(&mut self) {
        {
            let mut requested = recover(self.signal.requested.lock());
            *requested = true;
            self.signal.wake.notify_all();
        }

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("poller thread panicked");
            }
            self.running.store(false, Ordering::SeqCst);
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.stop();
        }
    }
}

//! Cancellable timers scoped to a chart
//!
//! Every delayed or periodic callback a chart starts goes through its
//! [`Scheduler`]. Dropping or tearing down the scheduler aborts whatever is
//! still pending, so no callback outlives the chart that scheduled it.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::error::{ChartError, ChartResult};

/// Handle to one scheduled callback
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u64,
    abort: AbortHandle,
}

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop the timer; a callback that already ran is unaffected
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Check if the callback ran or the timer was cancelled
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// Owner of every timer a chart has started
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    timers: Vec<TimerHandle>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` once after `delay`
    pub fn schedule<F>(&mut self, delay: Duration, callback: F) -> ChartResult<TimerHandle>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = current_runtime()?;
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Ok(self.track(task.abort_handle()))
    }

    /// Run `callback` every `period`, starting immediately
    pub fn schedule_repeating<F>(&mut self, period: Duration, mut callback: F) -> ChartResult<TimerHandle>
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Err(ChartError::Scheduler(
                "repeating timer needs a non-zero period".to_string(),
            ));
        }
        let runtime = current_runtime()?;
        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        Ok(self.track(task.abort_handle()))
    }

    fn track(&mut self, abort: AbortHandle) -> TimerHandle {
        self.timers.retain(|t| !t.is_finished());
        let handle = TimerHandle {
            id: self.next_id,
            abort,
        };
        self.next_id += 1;
        self.timers.push(handle.clone());
        handle
    }

    /// Number of timers that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.timers.iter().filter(|t| !t.is_finished()).count()
    }

    /// Abort every tracked timer, returning how many were still pending
    pub fn cancel_all(&mut self) -> usize {
        let pending = self.pending();
        for timer in self.timers.drain(..) {
            timer.cancel();
        }
        if pending > 0 {
            tracing::debug!(pending, "cancelled pending timers");
        }
        pending
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

fn current_runtime() -> ChartResult<Handle> {
    Handle::try_current().map_err(|e| ChartError::Scheduler(e.to_string()))
}

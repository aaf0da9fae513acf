//! Autoplay scheduler
//!
//! While running, a single tokio task commands the position controller to
//! advance one step per interval. The scheduler owns that task: starting
//! while running is a no-op, and [`AutoplayScheduler::stop`] guarantees that
//! once it returns no advance is in progress and none will follow.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use marquee_contracts::PositionController;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

/// Interval between auto-advances when none is configured.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayPhase {
    /// No timer
    Idle,
    /// Timer active
    Running,
}

struct RunningTimer {
    /// Cleared under the lock by `stop`; the tick loop advances only while
    /// holding it and observing `true`.
    armed: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

pub struct AutoplayScheduler {
    interval: Duration,
    running: Option<RunningTimer>,
}

impl fmt::Debug for AutoplayScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoplayScheduler")
            .field("interval", &self.interval)
            .field("phase", &self.phase())
            .finish()
    }
}

impl Default for AutoplayScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOPLAY_INTERVAL)
    }
}

impl AutoplayScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn phase(&self) -> AutoplayPhase {
        match self.running {
            Some(_) => AutoplayPhase::Running,
            None => AutoplayPhase::Idle,
        }
    }

    /// Idle -> Running. Returns `false` (and does nothing) when a timer is
    /// already active.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, controller: Arc<dyn PositionController>) -> bool {
        if self.running.is_some() {
            return false;
        }

        let armed = Arc::new(Mutex::new(true));
        let gate = Arc::clone(&armed);
        let period = self.interval;

        let task = tokio::spawn(async move {
            // First advance happens one full period after start.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let armed = gate.lock();
                if !*armed {
                    break;
                }
                controller.advance();
            }
        });

        debug!(target: "carousel::autoplay", ?period, "autoplay started");
        self.running = Some(RunningTimer { armed, task });
        true
    }

    /// Running -> Idle. Returns `false` when already idle.
    pub fn stop(&mut self) -> bool {
        let Some(timer) = self.running.take() else {
            return false;
        };

        // Waits out an in-progress advance, then forbids further ones.
        *timer.armed.lock() = false;
        timer.task.abort();
        debug!(target: "carousel::autoplay", "autoplay stopped");
        true
    }
}

impl Drop for AutoplayScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

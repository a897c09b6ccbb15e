//! Periodic keep-alive scheduling.
//!
//! Portable like the rest of the crate: no timers, the caller passes `now`
//! on every poll.

use embassy_time::{Duration, Instant};

/// Default period between heartbeats
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// Fixed-rate heartbeat tick.
///
/// The schedule is not reset by other sends. If the caller stalls for more
/// than one interval the backlog is skipped instead of firing in a burst.
#[derive(Debug, Clone)]
pub struct HeartbeatScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl HeartbeatScheduler {
    /// Create a stopped scheduler
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arm the scheduler; the first beat fires one interval after `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns `true` when a heartbeat is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_due = Some(next);
        true
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn next_due(&self) -> Option<Instant> {
        self.next_due
    }
}

impl Default for HeartbeatScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_HEARTBEAT_INTERVAL)
    }
}

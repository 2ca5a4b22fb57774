// Repeating re-render tick, polled from the event loop.
//
// The timer keeps firing while animation is toggled off; the tick handler
// checks `rerender_blocks` itself. That matches the original single
// process-wide timer, which was started once and never cancelled.
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct AnimationLoop {
    /// Most recently configured interval.
    configured: Duration,
    /// Interval the running timer was started with. The running timer keeps
    /// this value until a restart unless restart-on-change was requested.
    active: Duration,
    deadline: Option<Instant>,
    restart_on_change: bool,
}

impl AnimationLoop {
    pub fn new(interval: Duration, restart_on_change: bool) -> Self {
        Self {
            configured: interval,
            active: interval,
            deadline: None,
            restart_on_change,
        }
    }

    /// Start (or restart) the timer, re-reading the configured interval.
    pub fn start(&mut self, now: Instant) {
        self.active = self.configured;
        self.deadline = Some(now + self.active);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.configured
    }

    /// Record a new interval. By default a running timer keeps its original
    /// cadence until the next explicit start; with restart-on-change the new
    /// interval takes effect immediately.
    pub fn set_interval(&mut self, now: Instant, interval: Duration) {
        self.configured = interval;
        if self.restart_on_change && self.deadline.is_some() {
            self.start(now);
        }
    }

    /// True when a tick is due; advances the deadline one active interval
    /// from `now` (late polls don't burst to catch up).
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.active);
                true
            }
            _ => false,
        }
    }
}

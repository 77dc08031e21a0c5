//! Cancellable periodic tasks driven by the event loop.
//!
//! Nothing runs on its own: the loop asks for the nearest deadline, sleeps in
//! `poll` until then, and collects the ticks that came due. Cancelling a task
//! removes its deadline, so a disabled reaction does no periodic work at all.

use std::time::{Duration, Instant};
use tracing::debug;

/// Periodic tasks owned by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Rotation,
    Stationary,
}

impl TimerKind {
    const ALL: [TimerKind; 2] = [TimerKind::Rotation, TimerKind::Stationary];

    fn index(self) -> usize {
        match self {
            TimerKind::Rotation => 0,
            TimerKind::Stationary => 1,
        }
    }
}

/// A due task together with the number of whole periods that elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub kind: TimerKind,
    pub count: u32,
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    intervals: [Option<Interval>; 2],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) a task; its first tick is one period after `now`.
    pub fn start(&mut self, kind: TimerKind, period: Duration, now: Instant) {
        let period = period.max(Duration::from_millis(1));
        self.intervals[kind.index()] = Some(Interval {
            period,
            next_due: now + period,
        });
        debug!(?kind, ?period, "timer started");
    }

    /// Cancels a task. Returns whether it was running.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let was_active = self.intervals[kind.index()].take().is_some();
        if was_active {
            debug!(?kind, "timer cancelled");
        }
        was_active
    }

    pub fn cancel_all(&mut self) {
        for kind in TimerKind::ALL {
            self.cancel(kind);
        }
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.intervals[kind.index()].is_some()
    }

    pub fn active_count(&self) -> usize {
        self.intervals.iter().flatten().count()
    }

    /// Earliest pending deadline, if any task is running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.intervals.iter().flatten().map(|i| i.next_due).min()
    }

    /// Collects every task whose deadline has passed and re-arms it.
    ///
    /// A task that is several periods late fires once with `count` set to the
    /// number of periods that elapsed; its next deadline stays on the original
    /// period grid.
    pub fn due(&mut self, now: Instant) -> Vec<Tick> {
        let mut ticks = Vec::new();
        for kind in TimerKind::ALL {
            if let Some(interval) = self.intervals[kind.index()].as_mut() {
                if now < interval.next_due {
                    continue;
                }
                let late = now.duration_since(interval.next_due);
                let count = 1 + (late.as_nanos() / interval.period.as_nanos()) as u32;
                interval.next_due += interval.period * count;
                ticks.push(Tick { kind, count });
            }
        }
        ticks
    }
}

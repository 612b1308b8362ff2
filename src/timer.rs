//! Turn timers.
//!
//! Each controller owns one [`TimerSlot`]. Arming replaces whatever was armed before,
//! so a deadline belonging to an earlier turn or hand can never fire later.

use parking_lot::Mutex;
use std::fmt;
use std::time::{Duration, Instant};

use crate::seat::Seat;

/// Source of "now" for timer deadlines.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Mutex::new(Instant::now()) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Bid,
    Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTimer {
    pub kind: TimerKind,
    pub seat: Seat,
    pub deadline: Instant,
}

#[derive(Debug, Default)]
pub struct TimerSlot {
    armed: Option<TurnTimer>,
}

impl TimerSlot {
    pub fn arm(&mut self, kind: TimerKind, seat: Seat, now: Instant, after: Duration) -> TurnTimer {
        let timer = TurnTimer { kind, seat, deadline: now + after };
        self.armed = Some(timer);
        timer
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn armed(&self) -> Option<TurnTimer> {
        self.armed
    }

    /// Disarm and return the timer if its deadline has passed.
    pub fn take_expired(&mut self, now: Instant) -> Option<TurnTimer> {
        match self.armed {
            Some(t) if now >= t.deadline => self.armed.take(),
            _ => None,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.armed.map(|t| t.deadline.saturating_duration_since(now))
    }
}

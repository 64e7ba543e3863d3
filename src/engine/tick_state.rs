//=========================================================================
// Tick State
//=========================================================================
//
// Fixed-rate tick scheduling.
//
// Every frame samples the clock once. All ticks whose deadline is at or
// before that sample run, up to `max_frame_skip`. When the cap is hit
// the schedule jumps to the sample instead of trying to catch up.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::trace;

//=== Clock ===============================================================

/// Monotonic time source, in seconds since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by.as_secs_f64());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

//=== TickState ===========================================================

#[derive(Debug, Clone)]
pub struct TickState {
    rate: u32,
    step: f64,
    max_frame_skip: u32,
    next_tick: Option<f64>,
    ticks: u64,
}

impl TickState {
    pub fn new(rate: u32, max_frame_skip: u32) -> Self {
        debug_assert!(rate > 0, "tick rate must be positive");
        let rate = rate.max(1);
        Self {
            rate,
            step: 1.0 / f64::from(rate),
            max_frame_skip: max_frame_skip.max(1),
            next_tick: None,
            ticks: 0,
        }
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Seconds per tick.
    pub fn step(&self) -> f32 {
        self.step as f32
    }

    pub fn max_frame_skip(&self) -> u32 {
        self.max_frame_skip
    }

    /// Ticks run since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Restarts the schedule; the first tick is due at `now`.
    pub fn reset(&mut self, now: f64) {
        self.next_tick = Some(now);
        self.ticks = 0;
    }

    /// Number of ticks to run for a frame sampled at `now`.
    pub fn advance(&mut self, now: f64) -> u32 {
        let mut next = self.next_tick.unwrap_or(now);
        let mut due = 0;

        while next <= now && due < self.max_frame_skip {
            next += self.step;
            due += 1;
        }
        if due == self.max_frame_skip && next <= now {
            trace!("Tick schedule behind by {:.4}s, resyncing", now - next);
            next = now + self.step;
        }

        self.next_tick = Some(next);
        self.ticks += u64::from(due);
        due
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

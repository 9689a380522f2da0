//! Debounce and per-frame throttle
//!
//! Both are plain state machines driven by the caller's clock (ms) or frame
//! callback, so the browser layer owns timers and these stay testable.

/// Trailing-edge debounce: fires once, `delay_ms` after the last trigger.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: f64,
    deadline: Option<f64>,
    generation: u64,
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
            generation: 0,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Record an event at `now`. Returns a token for the timer that should
    /// call [`Debouncer::fire_token`]; earlier tokens become stale.
    pub fn trigger(&mut self, now: f64) -> u64 {
        self.generation += 1;
        self.deadline = Some(now + self.delay_ms);
        self.generation
    }

    /// Timer-style check: true only for the latest token, and only once.
    pub fn fire_token(&mut self, token: u64) -> bool {
        if token == self.generation && self.deadline.is_some() {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Coalesces a stream of values into at most one per rendered frame.
#[derive(Debug, Clone, Default)]
pub struct FrameThrottle<T> {
    pending: Option<T>,
}

impl<T> FrameThrottle<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Store the latest value. Returns true when the caller must schedule a
    /// frame callback (none is outstanding yet).
    pub fn push(&mut self, value: T) -> bool {
        let schedule = self.pending.is_none();
        self.pending = Some(value);
        schedule
    }

    /// Called from the frame callback: the latest value, if any.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }
}

//! Deterministic debounce/throttle state machines.
//!
//! Neither reads a clock — callers pass `now` in milliseconds from whatever
//! monotonic source the host has. That keeps scroll-event coalescing
//! testable without sleeping.

/// Trailing-edge debounce: the action runs once the triggering events have
/// been quiet for `wait` milliseconds.
#[derive(Debug)]
pub struct Debounce {
    wait_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            deadline: None,
        }
    }

    /// Record a triggering event, pushing the deadline out.
    pub fn trigger(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms + self.wait_ms);
    }

    /// Whether the debounced action should fire now. Consumes the pending
    /// deadline when it does.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Leading-edge throttle: at most one allowed call per `interval`
/// milliseconds.
#[derive(Debug)]
pub struct Throttle {
    interval_ms: u64,
    open_at: u64,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            open_at: 0,
        }
    }

    /// Whether a call at `now` may proceed. A successful call closes the
    /// gate for the next `interval` milliseconds.
    pub fn allow(&mut self, now_ms: u64) -> bool {
        if now_ms < self.open_at {
            return false;
        }
        self.open_at = now_ms + self.interval_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_fires_after_quiet_period() {
        let mut debounce = Debounce::new(100);
        debounce.trigger(0);
        assert!(!debounce.poll(50));
        assert!(debounce.poll(100));
        // One-shot until re-triggered.
        assert!(!debounce.poll(500));
    }

    #[test]
    fn retrigger_pushes_deadline_out() {
        let mut debounce = Debounce::new(100);
        debounce.trigger(0);
        debounce.trigger(80);
        assert!(!debounce.poll(120));
        assert!(debounce.poll(180));
    }

    #[test]
    fn idle_debounce_never_fires() {
        let mut debounce = Debounce::new(100);
        assert!(!debounce.poll(1_000_000));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn throttle_gates_repeat_calls() {
        let mut throttle = Throttle::new(100);
        assert!(throttle.allow(0));
        assert!(!throttle.allow(50));
        assert!(!throttle.allow(99));
        assert!(throttle.allow(100));
        assert!(!throttle.allow(150));
    }

    #[test]
    fn first_call_always_passes() {
        let mut throttle = Throttle::new(1000);
        assert!(throttle.allow(0));
    }
}

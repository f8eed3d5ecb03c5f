/// Default ramp duration in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 2000;

/// Default tick interval in milliseconds (~60 updates per second).
pub const DEFAULT_TICK_MS: u32 = 16;

/// A timed, incremental animation from 0 toward a target value.
///
/// Fixed-step: every tick advances by `target / (duration / tick_interval)`
/// and yields the rounded current value. The moment the running value
/// reaches or passes the target, the ramp yields exactly the rounded target
/// and finishes — no overshoot is ever displayed.
///
/// The ramp never reads a clock; the host calls [`CounterRamp::tick`] on
/// its own timer cadence, which keeps the sequence fully deterministic.
#[derive(Debug, Clone)]
pub struct CounterRamp {
    target: f64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterRamp {
    pub fn new(target: f64, duration_ms: u32, tick_ms: u32) -> Self {
        let ticks = f64::from(duration_ms) / f64::from(tick_ms.max(1));
        Self {
            target,
            increment: target / ticks,
            current: 0.0,
            done: false,
        }
    }

    /// Ramp with the default 2000ms duration and 16ms tick.
    pub fn with_defaults(target: f64) -> Self {
        Self::new(target, DEFAULT_DURATION_MS, DEFAULT_TICK_MS)
    }

    /// Advance one tick. Returns the integer value to display, or `None`
    /// once the ramp has already finished.
    pub fn tick(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target {
            self.done = true;
            Some(self.target.round() as i64)
        } else {
            Some(self.current.round() as i64)
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(mut ramp: CounterRamp) -> Vec<i64> {
        let mut values = Vec::new();
        while let Some(v) = ramp.tick() {
            values.push(v);
        }
        values
    }

    #[test]
    fn final_value_is_exactly_target() {
        let values = run_to_completion(CounterRamp::with_defaults(200.0));
        assert_eq!(values.last().copied(), Some(200));
    }

    #[test]
    fn values_are_monotonically_non_decreasing() {
        let values = run_to_completion(CounterRamp::with_defaults(200.0));
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "regressed: {} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn tick_count_close_to_duration_over_interval() {
        // 2000 / 16 = 125 steps; the >= clamp may shave the last one.
        let values = run_to_completion(CounterRamp::with_defaults(200.0));
        let expected = (DEFAULT_DURATION_MS / DEFAULT_TICK_MS) as i64;
        let actual = values.len() as i64;
        assert!(
            (actual - expected).abs() <= 2,
            "expected ~{expected} ticks, got {actual}"
        );
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut ramp = CounterRamp::with_defaults(0.0);
        assert_eq!(ramp.tick(), Some(0));
        assert!(ramp.is_done());
        assert_eq!(ramp.tick(), None);
    }

    #[test]
    fn no_values_after_done() {
        let mut ramp = CounterRamp::new(10.0, 32, 16);
        let mut count = 0;
        while ramp.tick().is_some() {
            count += 1;
        }
        assert!(count >= 1);
        assert_eq!(ramp.tick(), None);
        assert_eq!(ramp.tick(), None);
    }

    #[test]
    fn small_target_long_duration_still_reaches_target() {
        let values = run_to_completion(CounterRamp::with_defaults(3.0));
        assert_eq!(values.last().copied(), Some(3));
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }
}

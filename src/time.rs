//! Wraparound-safe tick timing for the driving loop.

/// Measures elapsed milliseconds between loop iterations.
///
/// Feed it your platform's free-running millisecond counter and it returns
/// the delta since the previous call. The subtraction is wrapping, so a
/// counter rollover (every ~49.7 days on a 32-bit timer) self-corrects
/// instead of producing a huge spurious delta.
///
/// ```rust,ignore
/// let mut timer = TickTimer::new(millis());
/// loop {
///     let elapsed = timer.tick(millis());
///     blinker.tick_update(elapsed);
///     // ... service everything else ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    last_millis: u32,
}

impl TickTimer {
    /// Creates a timer anchored at the given counter reading.
    pub fn new(now_millis: u32) -> Self {
        Self { last_millis: now_millis }
    }

    /// Returns the milliseconds elapsed since the previous call (or since
    /// construction) and re-anchors at `now_millis`.
    pub fn tick(&mut self, now_millis: u32) -> u32 {
        let elapsed = now_millis.wrapping_sub(self.last_millis);
        self.last_millis = now_millis;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_delta_since_previous_tick() {
        let mut timer = TickTimer::new(1000);
        assert_eq!(timer.tick(1010), 10);
        assert_eq!(timer.tick(1010), 0);
        assert_eq!(timer.tick(2500), 1490);
    }

    #[test]
    fn counter_rollover_self_corrects() {
        let mut timer = TickTimer::new(u32::MAX - 4);
        assert_eq!(timer.tick(5), 10);
        assert_eq!(timer.tick(5), 0);
    }
}

//! Non-blocking interval playback with timing driven by the caller.
//!
//! Provides [`IntervalBlinker`] which plays a borrowed table of ON/OFF
//! durations, invoking a [`BlinkSink`] at each phase boundary. Also defines
//! the [`BlinkSink`] trait for hardware abstraction.

use crate::command::BlinkerAction;
use crate::pattern::DEFAULT_BLINK;
use crate::types::{BlinkerError, Cycles};

/// Trait for abstracting a switchable output device.
///
/// Implement this for your LED, buzzer or relay hardware to let a blinker
/// drive it. Active-low wiring is the implementor's concern: `on == true`
/// always means "make the device perceptibly active".
pub trait BlinkSink {
    /// Drives the device to the given phase.
    ///
    /// Called synchronously from `start` and `tick_update`; must not block.
    /// Handle any hardware errors internally - this method cannot fail.
    fn set_active(&mut self, on: bool);
}

/// Remaining cycle budget of the active run. `Idle` doubles as the stopped
/// and the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Remaining {
    Idle,
    Finite(u8),
    Endless,
}

/// Plays a table of timed intervals through a boolean output device.
///
/// The interval table is an ordered sequence of millisecond durations where
/// index parity encodes phase: even index = ON, odd index = OFF. The blinker
/// borrows the table and never copies or mutates it.
///
/// There is no internal clock. The driving loop measures elapsed wall-clock
/// time itself and reports it via [`tick_update`](Self::tick_update); the
/// blinker accumulates those deltas and drains phase boundaries as they are
/// reached, firing the sink once per boundary. A single coarse tick may cross
/// several boundaries and each one is signalled in order, so the polling
/// cadence and the logical timeline stay decoupled.
///
/// # Type Parameters
/// * `'a` - Lifetime of the borrowed interval table
/// * `S` - Output device implementation type
pub struct IntervalBlinker<'a, S: BlinkSink> {
    intervals: &'a [u32],
    sink: Option<S>,
    from: usize,
    to: usize,
    current: usize,
    elapsed: u32,
    remaining: Remaining,
}

impl<'a, S: BlinkSink> IntervalBlinker<'a, S> {
    /// Creates an idle blinker driving the given sink with the default
    /// 1-second pattern (500 ms ON, 500 ms OFF).
    pub fn new(sink: S) -> Self {
        Self {
            intervals: &DEFAULT_BLINK,
            sink: Some(sink),
            from: 0,
            to: 0,
            current: 0,
            elapsed: 0,
            remaining: Remaining::Idle,
        }
    }

    /// Creates an idle blinker with no sink attached.
    ///
    /// A detached blinker runs its state machine normally but performs no
    /// externally visible signalling. Attach a sink later with
    /// [`set_sink`](Self::set_sink).
    pub fn detached() -> Self {
        Self {
            intervals: &DEFAULT_BLINK,
            sink: None,
            from: 0,
            to: 0,
            current: 0,
            elapsed: 0,
            remaining: Remaining::Idle,
        }
    }

    /// Replaces the interval table and stops any active run.
    ///
    /// The table is borrowed, not copied: the caller guarantees it outlives
    /// the blinker's use of it (typically a `static`). No sink call is made;
    /// the device keeps whatever phase it last had.
    ///
    /// # Errors
    /// * `EmptyIntervals` - The table has no entries
    pub fn set_intervals(&mut self, intervals: &'a [u32]) -> Result<(), BlinkerError> {
        if intervals.is_empty() {
            return Err(BlinkerError::EmptyIntervals);
        }

        self.intervals = intervals;
        self.remaining = Remaining::Idle;
        Ok(())
    }

    /// Attaches or replaces the sink.
    pub fn set_sink(&mut self, sink: S) {
        self.sink = Some(sink);
    }

    /// Detaches and returns the sink, if one is attached.
    pub fn take_sink(&mut self) -> Option<S> {
        self.sink.take()
    }

    /// Returns a mutable reference to the attached sink, if any.
    ///
    /// Lets the owner drive the device directly while the blinker is idle
    /// (e.g. holding an alarm LED solid ON).
    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }

    /// Starts playback of the sub-range `from..=to` of the interval table.
    ///
    /// Resets the playback cursor to `from` with no accumulated time,
    /// discarding any run in progress. If the run actually starts (a nonzero
    /// budget) and `intervals[from]` is nonzero, the sink is immediately
    /// invoked with the phase of `from` - the first phase is announced before
    /// any time has elapsed. `Cycles::Finite(0)` resets and stays idle
    /// without signalling.
    ///
    /// # Errors
    /// * `RangeOutOfBounds` - `from <= to < len` does not hold
    /// * `AllZeroEndless` - Endless playback over intervals that are all zero
    pub fn start_range(
        &mut self,
        cycles: Cycles,
        from: usize,
        to: usize,
    ) -> Result<(), BlinkerError> {
        let len = self.intervals.len();
        if from > to || to >= len {
            return Err(BlinkerError::RangeOutOfBounds { from, to, len });
        }

        // An endless run over an all-zero range would drain forever.
        if cycles == Cycles::Endless && self.intervals[from..=to].iter().all(|&d| d == 0) {
            return Err(BlinkerError::AllZeroEndless);
        }

        self.from = from;
        self.to = to;
        self.current = from;
        self.elapsed = 0;
        self.remaining = match cycles {
            Cycles::Finite(0) => Remaining::Idle,
            Cycles::Finite(n) => Remaining::Finite(n),
            Cycles::Endless => Remaining::Endless,
        };

        if self.remaining != Remaining::Idle && self.intervals[from] > 0 {
            if let Some(sink) = self.sink.as_mut() {
                sink.set_active(from % 2 == 0);
            }
        }

        Ok(())
    }

    /// Starts playback of the full interval table.
    pub fn start(&mut self, cycles: Cycles) -> Result<(), BlinkerError> {
        self.start_range(cycles, 0, self.intervals.len() - 1)
    }

    /// Starts endless playback of the full interval table.
    pub fn start_endless(&mut self) -> Result<(), BlinkerError> {
        self.start(Cycles::Endless)
    }

    /// Stops playback. Idempotent; no sink call is made.
    pub fn stop(&mut self) {
        self.remaining = Remaining::Idle;
    }

    /// Advances playback by the given number of elapsed milliseconds.
    ///
    /// Call this from your main loop with the time elapsed since the previous
    /// call (see [`TickTimer`](crate::time::TickTimer) for wraparound-safe
    /// measurement). Every phase boundary reached within the reported time is
    /// crossed and signalled in order; zero-length phases are crossed for
    /// free with their signal suppressed. When a finite cycle budget runs
    /// out, the run goes idle immediately and any boundary crossings still
    /// pending in the same call are abandoned.
    ///
    /// # Returns
    /// * `true` - Still running after processing
    /// * `false` - Idle: either already idle on entry (no side effects) or
    ///   the cycle budget was exhausted during this call
    pub fn tick_update(&mut self, elapsed_millis: u32) -> bool {
        if self.remaining == Remaining::Idle {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(elapsed_millis);
        while self.elapsed >= self.intervals[self.current] {
            self.elapsed -= self.intervals[self.current];

            self.current += 1;
            if self.current > self.to {
                self.current = self.from;
                if let Remaining::Finite(n) = self.remaining {
                    if n <= 1 {
                        self.remaining = Remaining::Idle;
                        return false;
                    }
                    self.remaining = Remaining::Finite(n - 1);
                }
            }

            if self.intervals[self.current] > 0 {
                if let Some(sink) = self.sink.as_mut() {
                    sink.set_active(self.current % 2 == 0);
                }
            }
        }

        true
    }

    /// Handles a blinker action by dispatching to the appropriate method.
    ///
    /// This is a convenience method for command-based control, allowing
    /// actions to be dispatched without matching on the action type manually.
    pub fn handle_action(&mut self, action: BlinkerAction<'a>) -> Result<(), BlinkerError> {
        match action {
            BlinkerAction::SetIntervals(intervals) => self.set_intervals(intervals),
            BlinkerAction::Start(cycles) => self.start(cycles),
            BlinkerAction::StartRange { cycles, from, to } => {
                self.start_range(cycles, from, to)
            }
            BlinkerAction::StartEndless => self.start_endless(),
            BlinkerAction::Stop => {
                self.stop();
                Ok(())
            }
        }
    }

    /// Returns true while a run is active.
    pub fn is_running(&self) -> bool {
        self.remaining != Remaining::Idle
    }

    /// Returns the currently installed interval table.
    pub fn intervals(&self) -> &'a [u32] {
        self.intervals
    }

    /// Returns the phase of the current interval, or `None` when idle.
    pub fn current_phase(&self) -> Option<bool> {
        if self.is_running() {
            Some(self.current % 2 == 0)
        } else {
            None
        }
    }

    /// Returns the remaining cycle budget, or `None` when idle.
    pub fn remaining_cycles(&self) -> Option<Cycles> {
        match self.remaining {
            Remaining::Idle => None,
            Remaining::Finite(n) => Some(Cycles::Finite(n)),
            Remaining::Endless => Some(Cycles::Endless),
        }
    }
}

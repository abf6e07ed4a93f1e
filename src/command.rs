//! Command-based control for blinkers.

use crate::types::Cycles;

/// Actions for controlling blinkers.
#[derive(Debug, Clone, Copy)]
pub enum BlinkerAction<'a> {
    /// Replace the interval table, stopping playback.
    SetIntervals(&'a [u32]),
    /// Start full-range playback.
    Start(Cycles),
    /// Start playback of a table sub-range.
    StartRange {
        /// Cycle budget for the run.
        cycles: Cycles,
        /// First interval index.
        from: usize,
        /// Last interval index, inclusive.
        to: usize,
    },
    /// Start endless full-range playback.
    StartEndless,
    /// Stop playback.
    Stop,
}

/// Command targeting a specific blinker.
#[derive(Debug, Clone, Copy)]
pub struct BlinkerCommand<'a, Id> {
    pub blinker_id: Id,
    pub action: BlinkerAction<'a>,
}

impl<'a, Id> BlinkerCommand<'a, Id> {
    /// Creates command.
    pub fn new(blinker_id: Id, action: BlinkerAction<'a>) -> Self {
        Self { blinker_id, action }
    }
}

//! Core types for blinker configuration.

/// How many cycles a playback run should last.
///
/// A cycle is one full traversal of the active interval range. `Finite(0)`
/// is legal and means "start idle": the run resets but never plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycles {
    /// Play the range a specific number of times, then go idle.
    Finite(u8),

    /// Play the range until explicitly stopped.
    Endless,
}

impl Default for Cycles {
    fn default() -> Self {
        Cycles::Endless
    }
}

/// Blinker configuration errors.
///
/// All of these indicate a caller bug (bad table or bad range), so they are
/// reported rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkerError {
    /// An empty interval table was supplied.
    EmptyIntervals,

    /// A start range does not satisfy `from <= to < len`.
    RangeOutOfBounds {
        /// First interval index of the requested range.
        from: usize,
        /// Last interval index of the requested range.
        to: usize,
        /// Length of the installed interval table.
        len: usize,
    },

    /// An endless run was requested over a range whose intervals are all
    /// zero, which would never consume any elapsed time.
    AllZeroEndless,
}

impl core::fmt::Display for BlinkerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BlinkerError::EmptyIntervals => {
                write!(f, "interval table must have at least one entry")
            }
            BlinkerError::RangeOutOfBounds { from, to, len } => {
                write!(
                    f,
                    "range {}..={} is invalid for a table of {} intervals",
                    from, to, len
                )
            }
            BlinkerError::AllZeroEndless => {
                write!(f, "endless playback over an all-zero range never advances")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BlinkerError {}

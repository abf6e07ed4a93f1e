//! Ready-made interval tables.
//!
//! Interval tables are plain `&'static [u32]` slices of millisecond
//! durations. Index parity encodes phase: even index = ON, odd index = OFF,
//! so every table starts with an ON duration. A zero entry skips its phase
//! without signalling it, which is how a pattern holds one phase across
//! several entries (see [`MORSE_SOS`]).

/// Blinks each second: 500 ms ON and 500 ms OFF.
///
/// Installed by default on every new blinker.
pub static DEFAULT_BLINK: [u32; 2] = [500, 500];

/// Fast blink used while a sensor warms up: 125 ms ON and 125 ms OFF.
pub static CALIBRATION_BLINK: [u32; 2] = [125, 125];

/// Short flash every three seconds, signalling "alive and connected"
/// without lighting the room: 10 ms ON and 3000 ms OFF.
pub static LINK_UP_BLINK: [u32; 2] = [10, 3000];

/// Duration of a morse dot mark in milliseconds.
pub const DOT: u32 = 250;
/// Duration of a morse dash mark.
pub const DASH: u32 = DOT * 3;
/// Gap between marks within a character.
pub const SEP: u32 = DOT;
/// Gap between characters.
pub const CHAR_SEP: u32 = DASH;
/// Gap between words.
pub const WORD_SEP: u32 = DOT * 7;

/// The morse word "SOS", marks and gaps alternating.
///
/// The final pair is a zero-length ON phase followed by a word gap, keeping
/// the device dark between repetitions.
pub static MORSE_SOS: [u32; 20] = [
    DOT, SEP, DOT, SEP, DOT, CHAR_SEP, // S     (0-5)
    DASH, SEP, DASH, SEP, DASH, CHAR_SEP, // O  (6-11)
    DOT, SEP, DOT, SEP, DOT, CHAR_SEP, // S     (12-17)
    0, WORD_SEP, // blank                      (18-19)
];

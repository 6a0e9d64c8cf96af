//! Load-program format of the frequency synthesizer.
//!
//! The synthesizer is reprogrammed through two lines — `progen` (enable)
//! and `progdata` — by a fixed 27-step pulse schedule carrying a 16-bit
//! word: `(multiplier − 1) << 8 | (divider − 1)`.
//!
//! ```text
//! step   progen  progdata
//! ─────  ──────  ─────────────────────────────
//!  0–1     1     1, 0            LoadD command
//!  2–9     1     divider−1       LSB first
//!  10      0     0               gap
//!  11–12   1     1, 1            LoadM command
//!  13–20   1     multiplier−1    LSB first
//!  21      0     0               gap
//!  22      1     0               GO
//!  23–26   0     0               wait for done
//! ```
//!
//! The output frequency is `reference × multiplier / divider`; both fields
//! are stored minus one. The device holds the final step until the
//! synthesizer's done level returns high.

/// Number of active sequencer steps (states 0..=26).
pub const PROGRAM_STEPS: u8 = 27;

/// Sequencer idle state.
pub const STATE_IDLE: u8 = 31;

/// Smallest legal multiplier. Requests below `2 × MIN_MULTIPLIER` MHz
/// clamp here.
pub const MIN_MULTIPLIER: u8 = 2;

const LOAD_D_END: u8 = 1;
const DIV_BITS_END: u8 = 9;
const GAP_1: u8 = 10;
const LOAD_M_END: u8 = 12;
const MULT_BITS_END: u8 = 20;
const GAP_2: u8 = 21;
const GO: u8 = 22;

/// Pin levels for one sequencer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynthPins {
    /// Program-enable line.
    pub progen: bool,
    /// Program-data line.
    pub progdata: bool,
}

/// Pack a multiplier/divider pair into the 16-bit program word.
#[must_use]
pub fn program_word(multiplier: u8, divider: u8) -> u16 {
    (u16::from(multiplier - 1) << 8) | u16::from(divider - 1)
}

/// Pin levels for step `step` (0..=26) of a program carrying `word`.
///
/// Steps outside the active range (including [`STATE_IDLE`]) idle both
/// lines low.
#[must_use]
pub fn step_pins(step: u8, word: u16) -> SynthPins {
    let divider = word & 0xFF;
    let multiplier = word >> 8;
    match step {
        0 => SynthPins { progen: true, progdata: true },
        s if s <= LOAD_D_END => SynthPins { progen: true, progdata: false },
        s if s <= DIV_BITS_END => SynthPins {
            progen: true,
            progdata: (divider >> (s - 2)) & 1 == 1,
        },
        GAP_1 => SynthPins::default(),
        s if s <= LOAD_M_END => SynthPins { progen: true, progdata: true },
        s if s <= MULT_BITS_END => SynthPins {
            progen: true,
            progdata: (multiplier >> (s - 13)) & 1 == 1,
        },
        GAP_2 => SynthPins::default(),
        GO => SynthPins { progen: true, progdata: false },
        _ => SynthPins::default(),
    }
}

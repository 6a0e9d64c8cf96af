//! Frequency-programming sequencer.
//!
//! Watches the clock register and, whenever the *clamped* requested
//! multiplier differs from the one currently applied while the synthesizer
//! reports idle, walks the fixed 27-step load program from
//! [`hashctl_chip::synth`], one state per clock-domain tick. The sequencer
//! leaves the final state only once the synthesizer reports done; the
//! applied multiplier updates then.
//!
//! There is no request queue: the trigger compares against
//! "currently applied", so the next differing value after a run completes
//! simply starts another run.

use crate::error::{LinkError, Result};
use hashctl_chip::synth::{
    program_word, step_pins, SynthPins, MIN_MULTIPLIER, PROGRAM_STEPS, STATE_IDLE,
};
use tracing::debug;

/// Construction-time frequency parameters. Not runtime-mutable.
#[derive(Debug, Clone, Copy)]
pub struct FreqConfig {
    reference_mhz: u32,
    max_mhz: u32,
    initial_mhz: u32,
}

impl FreqConfig {
    /// Validate and build a configuration.
    ///
    /// The synthesizer's fields are 8 bits wide and store value−1, and the
    /// multiplier floor is [`MIN_MULTIPLIER`], which bounds everything:
    /// reference and maximum must sit in `[2 × MIN_MULTIPLIER, 510]` MHz,
    /// and the initial frequency inside `[floor, maximum]`. Only *runtime*
    /// requests through the clock register get clamped; a bad compile-time
    /// parameter is a configuration mistake and is rejected.
    ///
    /// # Errors
    ///
    /// [`LinkError::InvalidFrequencyConfig`] when a parameter is outside
    /// the programmable range.
    pub fn new(reference_mhz: u32, max_mhz: u32, initial_mhz: u32) -> Result<Self> {
        let floor = 2 * u32::from(MIN_MULTIPLIER);
        if !(floor..=510).contains(&reference_mhz) {
            return Err(LinkError::invalid_frequency_config(format!(
                "reference {reference_mhz} MHz outside {floor}..=510"
            )));
        }
        if reference_mhz % 2 != 0 {
            return Err(LinkError::invalid_frequency_config(format!(
                "reference {reference_mhz} MHz must be even (divider is reference/2)"
            )));
        }
        if !(floor..=510).contains(&max_mhz) {
            return Err(LinkError::invalid_frequency_config(format!(
                "maximum {max_mhz} MHz outside {floor}..=510"
            )));
        }
        if !(floor..=max_mhz).contains(&initial_mhz) {
            return Err(LinkError::invalid_frequency_config(format!(
                "initial {initial_mhz} MHz outside {floor}..={max_mhz}"
            )));
        }
        Ok(Self {
            reference_mhz,
            max_mhz,
            initial_mhz,
        })
    }

    /// Frequency preloaded into the clock register at reset.
    #[must_use]
    pub fn initial_mhz(&self) -> u32 {
        self.initial_mhz
    }

    /// Clamp a requested frequency to its multiplier: `mhz / 2`, held to
    /// `[MIN_MULTIPLIER, max/2]`.
    #[must_use]
    pub fn clamp_multiplier(&self, requested_mhz: u32) -> u8 {
        let m = (requested_mhz / 2).clamp(u32::from(MIN_MULTIPLIER), self.max_mhz / 2);
        u8::try_from(m).unwrap_or(u8::MAX)
    }

    fn divider(&self) -> u8 {
        u8::try_from(self.reference_mhz / 2).unwrap_or(u8::MAX)
    }
}

/// 27-step synthesizer load-program driver.
#[derive(Debug)]
pub struct FrequencySequencer {
    cfg: FreqConfig,
    state: u8,
    word: u16,
    pending: u8,
    applied: u8,
}

impl FrequencySequencer {
    /// Idle sequencer; the initial frequency counts as already applied.
    #[must_use]
    pub fn new(cfg: FreqConfig) -> Self {
        let applied = cfg.clamp_multiplier(cfg.initial_mhz);
        Self {
            cfg,
            state: STATE_IDLE,
            word: 0,
            pending: applied,
            applied,
        }
    }

    /// Multiplier currently applied to the synthesizer.
    #[must_use]
    pub fn applied_multiplier(&self) -> u8 {
        self.applied
    }

    /// True when no load program is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == STATE_IDLE
    }

    /// Advance one clock-domain tick.
    ///
    /// `requested_mhz` is the clock register's current value;
    /// `synth_done` is the synthesizer's done/idle level.
    pub fn tick(&mut self, requested_mhz: u32, synth_done: bool) -> SynthPins {
        if self.state == STATE_IDLE {
            let want = self.cfg.clamp_multiplier(requested_mhz);
            if want == self.applied || !synth_done {
                return SynthPins::default();
            }
            self.pending = want;
            self.word = program_word(want, self.cfg.divider());
            self.state = 0;
            debug!(
                multiplier = want,
                word = format_args!("{:#06x}", self.word),
                "frequency reprogram started"
            );
        }

        let pins = step_pins(self.state, self.word);
        if self.state == PROGRAM_STEPS - 1 {
            // hold the final state until the synthesizer reports done
            if synth_done {
                self.applied = self.pending;
                self.state = STATE_IDLE;
                debug!(multiplier = self.applied, "frequency reprogram complete");
            }
        } else {
            self.state += 1;
        }
        pins
    }
}

//! The assembled device: one struct, three tick functions.
//!
//! [`Controller`] owns every component and exposes exactly one entry point
//! per clock domain. Nothing blocks; each call advances its domain by one
//! step and returns that domain's outputs. Single-writer discipline holds
//! throughout: the register file is written only from the link tick, the
//! job pipeline only from the core tick, the sequencer only from the clock
//! tick.

use crate::bridge::ResultBridge;
use crate::freq::{FreqConfig, FrequencySequencer};
use crate::job::{Job, JobLatch};
use crate::protocol::{LinkInput, LinkOutput, ProtocolEngine};
use crate::registers::RegisterFile;
use hashctl_chip::synth::SynthPins;

/// One core-domain tick's worth of inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreInput {
    /// Candidate result, valid when `strobe` is set.
    pub result: u32,
    /// Result strobe — high for exactly one core tick per result.
    pub strobe: bool,
}

impl CoreInput {
    /// A tick with no result.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A tick carrying one result.
    #[must_use]
    pub fn result(value: u32) -> Self {
        Self { result: value, strobe: true }
    }
}

/// What the core domain sees each tick.
#[derive(Debug, Clone, Copy)]
pub struct CoreOutput {
    /// The job as settled in the core domain.
    pub job: Job,
    /// One-tick pulse marking a fresh job.
    pub new_job: bool,
}

/// Observable control-domain state, for tests and instrumentation.
///
/// Derived equality makes "exactly no state change" directly checkable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Register file contents.
    pub regs: RegisterFile,
    /// Latched access address.
    pub current_address: u8,
    /// Job commit toggle.
    pub job_toggle: bool,
    /// Whether an unread result is pending.
    pub result_pending: bool,
}

/// The control-plane device.
#[derive(Debug)]
pub struct Controller {
    regs: RegisterFile,
    engine: ProtocolEngine,
    bridge: ResultBridge,
    jobs: JobLatch,
    freq: FrequencySequencer,
}

impl Controller {
    /// Device at power-on with the given frequency parameters.
    #[must_use]
    pub fn new(cfg: FreqConfig) -> Self {
        Self {
            regs: RegisterFile::new(cfg.initial_mhz()),
            engine: ProtocolEngine::new(),
            bridge: ResultBridge::new(),
            jobs: JobLatch::new(),
            freq: FrequencySequencer::new(cfg),
        }
    }

    /// Advance the control-link domain one tick.
    pub fn tick_link(&mut self, input: LinkInput) -> LinkOutput {
        self.engine
            .tick(input, &mut self.regs, &mut self.bridge, &mut self.jobs)
    }

    /// Advance the hashing-core domain one tick.
    pub fn tick_core(&mut self, input: CoreInput) -> CoreOutput {
        if input.strobe {
            self.bridge.publish(input.result);
        }
        let (job, new_job) = self.jobs.tick_core();
        CoreOutput { job, new_job }
    }

    /// Advance the frequency-programming domain one tick.
    pub fn tick_clock(&mut self, synth_done: bool) -> SynthPins {
        self.freq.tick(self.regs.clock_mhz(), synth_done)
    }

    /// Multiplier currently applied to the synthesizer.
    #[must_use]
    pub fn applied_multiplier(&self) -> u8 {
        self.freq.applied_multiplier()
    }

    /// True when no synthesizer load program is in flight.
    #[must_use]
    pub fn sequencer_idle(&self) -> bool {
        self.freq.is_idle()
    }

    /// Observable control-domain state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            regs: self.regs.clone(),
            current_address: self.engine.current_address(),
            job_toggle: self.jobs.toggle(),
            result_pending: self.bridge.has_unread(),
        }
    }
}

//! Control-plane engine for the hashing accelerator.
//!
//! Implements the device side of the bit-serial register link plus the two
//! clock-domain crossings around it, as a deterministic explicit-step
//! simulation: every domain advances exactly one step per call to its tick
//! function, and "waiting" is staying in the same state across ticks.
//!
//! ```text
//!           host ⇄ ProtocolEngine ⇄ RegisterFile
//!                                      │        │
//!                         clock_config │        │ job registers
//!                                      ▼        ▼
//!                      FrequencySequencer     JobLatch ──▶ hashing core
//!                                      │
//!                                      ▼            hashing core results
//!                        external synthesizer            │
//!                                                        ▼
//!                      RegisterFile read path ◀── ResultBridge
//! ```
//!
//! # Domains
//!
//! Three free-running domains, stepped independently through
//! [`Controller`]:
//!
//! | tick | domain | drives |
//! |------|--------|--------|
//! | [`Controller::tick_link`] | control link | [`ProtocolEngine`], [`RegisterFile`], consumer side of [`ResultBridge`] |
//! | [`Controller::tick_core`] | hashing core | producer side of [`ResultBridge`], [`JobLatch`] |
//! | [`Controller::tick_clock`] | frequency programming | [`FrequencySequencer`] |
//!
//! Cross-domain values travel only through the toggle/synchronizer pattern
//! in [`sync`]; nothing is shared for writing between domains. A
//! [`Scheduler`] interleaves the domains at configurable relative rates so
//! crossing races are reproducible in tests.
//!
//! # Quick start
//!
//! ```
//! use hashctl_link::{host, Controller, FreqConfig};
//!
//! # fn main() -> hashctl_link::Result<()> {
//! let cfg = FreqConfig::new(100, 400, 200)?;
//! let mut ctl = Controller::new(cfg);
//!
//! host::write_reg(&mut ctl, 0xD, 250);
//! assert_eq!(host::read_reg(&mut ctl, 0xD), 250);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod bridge;
mod device;
mod error;
mod freq;
pub mod host;
mod job;
mod protocol;
mod registers;
mod sched;
pub mod sync;

/// Wire-format constants (re-exported from hashctl-chip).
pub mod wire {
    pub use hashctl_chip::frame::{
        encode_read, encode_write, FRAME_BITS, FRAME_MASK,
    };
    pub use hashctl_chip::regs::{
        ADDR_CLOCK, ADDR_JOB_COMMIT, ADDR_NONE, ADDR_RESULT, ADDR_VERSION,
        SENTINEL, VERSION_WORD,
    };
    pub use hashctl_chip::synth::{SynthPins, PROGRAM_STEPS, STATE_IDLE};
}

pub use bridge::ResultBridge;
pub use device::{Controller, CoreInput, CoreOutput, Snapshot};
pub use error::{LinkError, Result};
pub use freq::{FreqConfig, FrequencySequencer};
pub use job::{Job, JobLatch};
pub use protocol::{LinkInput, LinkOutput, Phase, ProtocolEngine};
pub use registers::RegisterFile;
pub use sched::{DomainSet, Scheduler, TickRates};

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        Controller, CoreInput, FreqConfig, Job, LinkError, LinkInput, Result,
        Scheduler, TickRates,
    };
}

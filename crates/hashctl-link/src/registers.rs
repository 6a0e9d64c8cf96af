//! The 16-entry register file.
//!
//! Pure storage plus the read/write rules of the map in
//! [`hashctl_chip::regs`]; no control logic. Owned and written exclusively
//! by the protocol engine within the control domain — the single-writer
//! rule every crossing in this crate depends on.

use crate::job::Job;
use hashctl_chip::regs::{
    self, ADDR_CLOCK, ADDR_DATA_BASE, ADDR_JOB_COMMIT, ADDR_MIDSTATE_BASE,
    ADDR_VERSION, DATA_WORDS, MIDSTATE_WORDS, SENTINEL, VERSION_WORD,
};
use tracing::debug;

/// Addressable configuration/state of the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    midstate: [u32; MIDSTATE_WORDS],
    data: [u32; DATA_WORDS],
    clock_mhz: u32,
}

impl RegisterFile {
    /// Register file at reset, with the clock register preloaded.
    #[must_use]
    pub fn new(initial_clock_mhz: u32) -> Self {
        Self {
            midstate: [0; MIDSTATE_WORDS],
            data: [0; DATA_WORDS],
            clock_mhz: initial_clock_mhz,
        }
    }

    /// Read one register. The result register is *not* served here — the
    /// protocol engine substitutes the bridge's holding slot for address E;
    /// this path returns the sentinel for it like any reserved slot.
    #[must_use]
    pub fn read(&self, addr: u8) -> u32 {
        let addr = addr & 0xF;
        match addr {
            ADDR_VERSION => VERSION_WORD,
            a if (ADDR_MIDSTATE_BASE..ADDR_MIDSTATE_BASE + 8).contains(&a) => {
                self.midstate[usize::from(a - ADDR_MIDSTATE_BASE)]
            }
            a if (ADDR_DATA_BASE..=ADDR_JOB_COMMIT).contains(&a) => {
                self.data[usize::from(a - ADDR_DATA_BASE)]
            }
            ADDR_CLOCK => self.clock_mhz,
            _ => SENTINEL,
        }
    }

    /// Write one register. RO and reserved addresses are silent no-ops.
    ///
    /// A write to the commit register stores `data[2]` and returns the
    /// newly formed [`Job`] — midstate and data latched as one unit.
    pub fn write(&mut self, addr: u8, value: u32) -> Option<Job> {
        let addr = addr & 0xF;
        if !regs::is_writable(addr) {
            debug!(addr, "write to RO/reserved register ignored");
            return None;
        }
        match addr {
            a if (ADDR_MIDSTATE_BASE..ADDR_MIDSTATE_BASE + 8).contains(&a) => {
                self.midstate[usize::from(a - ADDR_MIDSTATE_BASE)] = value;
            }
            ADDR_JOB_COMMIT => {
                self.data[2] = value;
                debug!("job commit write");
                return Some(Job {
                    midstate: self.midstate,
                    data: self.data,
                });
            }
            a if (ADDR_DATA_BASE..ADDR_JOB_COMMIT).contains(&a) => {
                self.data[usize::from(a - ADDR_DATA_BASE)] = value;
            }
            ADDR_CLOCK => {
                self.clock_mhz = value;
                debug!(mhz = value, "clock register written");
            }
            _ => unreachable!("is_writable admits only mapped addresses"),
        }
        None
    }

    /// Requested core frequency in MHz, exactly as written (clamping is
    /// the frequency sequencer's business, not the register file's).
    #[must_use]
    pub fn clock_mhz(&self) -> u32 {
        self.clock_mhz
    }
}

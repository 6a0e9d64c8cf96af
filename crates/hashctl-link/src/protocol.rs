//! The capture/shift/update protocol engine.
//!
//! Device side of the register-access state machine:
//!
//! ```text
//! Idle ─capture─▶ Captured ─shift×38─▶ Shifting ─update─▶ Updated ─▶ Idle
//! ```
//!
//! The transport guarantees at most one of capture/shift/update per link
//! tick; reset is a level that preempts all of them and zeroes the
//! in-flight frame immediately.
//!
//! * **Capture** snapshots `regfile[current_address]` into the frame's low
//!   32 bits (address E is served from the result bridge's holding slot and
//!   consumed by it), zeroes the top 6 bits, resets the address latch to
//!   the no-address sentinel, and reseeds both parity accumulators to their
//!   trivially-valid state.
//! * **Shift** rotates one bit in (LSB-in at bit 37, bit 0 out) and keeps
//!   both parities current on every step — the full parity over everything
//!   shifted in, and the 6-bit parity over the frame's present top bits.
//! * **Update** dispatches the completed frame: a parity-valid read latches
//!   the address for the next capture and, for the result register, drains
//!   the bridge; a parity-valid write stores the payload and, for the
//!   commit register, forms a new job. A parity-invalid frame changes
//!   nothing at all — corrupting the checksum on purpose turns any frame
//!   into a side-effect-free probe.

use crate::bridge::ResultBridge;
use crate::job::JobLatch;
use crate::registers::RegisterFile;
use hashctl_chip::frame;
use hashctl_chip::regs::{ADDR_NONE, ADDR_RESULT};
use tracing::{debug, trace};

/// Protocol phase, advanced by the transport's pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No access in flight.
    #[default]
    Idle,
    /// Frame loaded, shifting not yet begun.
    Captured,
    /// Bits moving.
    Shifting,
    /// Frame dispatched, awaiting return to idle.
    Updated,
}

/// One link-domain tick's worth of transport signals.
///
/// Capture, shift and update are mutually exclusive per tick by transport
/// contract; reset preempts all of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkInput {
    /// Reset level. Zeroes the frame immediately.
    pub reset: bool,
    /// Capture pulse.
    pub capture: bool,
    /// Shift pulse; `tdi` is the incoming bit.
    pub shift: bool,
    /// Update pulse.
    pub update: bool,
    /// Serial input bit, sampled on shift.
    pub tdi: bool,
}

impl LinkInput {
    /// A tick with no pulses.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A capture pulse.
    #[must_use]
    pub fn capture() -> Self {
        Self { capture: true, ..Self::default() }
    }

    /// A shift pulse carrying one serial bit.
    #[must_use]
    pub fn shift(tdi: bool) -> Self {
        Self { shift: true, tdi, ..Self::default() }
    }

    /// An update pulse.
    #[must_use]
    pub fn update() -> Self {
        Self { update: true, ..Self::default() }
    }

    /// A reset tick.
    #[must_use]
    pub fn reset() -> Self {
        Self { reset: true, ..Self::default() }
    }
}

/// Signals back to the transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOutput {
    /// Serial output — the frame's bit 0.
    pub tdo: bool,
}

/// Capture/shift/update state machine.
#[derive(Debug)]
pub struct ProtocolEngine {
    frame: u64,
    current_address: u8,
    full_valid: bool,
    partial_valid: bool,
    phase: Phase,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Engine at reset: empty frame, no address latched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: 0,
            current_address: ADDR_NONE,
            full_valid: true,
            partial_valid: true,
            phase: Phase::Idle,
        }
    }

    /// Currently latched address (the no-address sentinel between
    /// accesses).
    #[must_use]
    pub fn current_address(&self) -> u8 {
        self.current_address
    }

    /// Current protocol phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance one link-domain tick.
    pub fn tick(
        &mut self,
        input: LinkInput,
        regs: &mut RegisterFile,
        bridge: &mut ResultBridge,
        jobs: &mut JobLatch,
    ) -> LinkOutput {
        // the consumer side of the result crossing breathes with this
        // domain's clock, pulses or not
        bridge.tick_sync();

        if input.reset {
            self.frame = 0;
            self.phase = Phase::Idle;
            trace!("link reset, frame cleared");
            return LinkOutput { tdo: false };
        }

        let tdo = frame::bit(self.frame, 0);
        if input.capture {
            self.capture(regs, bridge);
        } else if input.shift {
            self.shift(input.tdi);
        } else if input.update {
            self.update(regs, bridge, jobs);
        } else if self.phase == Phase::Updated {
            self.phase = Phase::Idle;
        }
        LinkOutput { tdo }
    }

    fn capture(&mut self, regs: &RegisterFile, bridge: &mut ResultBridge) {
        let value = if self.current_address == ADDR_RESULT {
            bridge.take_hold()
        } else {
            regs.read(self.current_address)
        };
        self.frame = u64::from(value);
        trace!(
            addr = self.current_address,
            value = format_args!("{value:#010x}"),
            "capture"
        );
        self.current_address = ADDR_NONE;
        self.full_valid = true;
        self.partial_valid = true;
        self.phase = Phase::Captured;
    }

    fn shift(&mut self, tdi: bool) {
        self.frame = (self.frame >> 1) | (u64::from(tdi) << frame::CHECKSUM_SHIFT);
        self.full_valid ^= tdi;
        self.partial_valid = frame::partial_parity(self.frame);
        self.phase = Phase::Shifting;
    }

    fn update(
        &mut self,
        regs: &mut RegisterFile,
        bridge: &mut ResultBridge,
        jobs: &mut JobLatch,
    ) {
        let f = self.frame;
        let addr = frame::address(f);
        if frame::is_write(f) {
            if self.full_valid {
                self.current_address = addr;
                debug!(
                    addr,
                    value = format_args!("{:#010x}", frame::payload(f)),
                    "write request"
                );
                if let Some(job) = regs.write(addr, frame::payload(f)) {
                    jobs.commit(job);
                }
            } else {
                trace!(addr, "write checksum mismatch, frame ignored");
            }
        } else if self.partial_valid {
            self.current_address = addr;
            debug!(addr, "read select");
            if addr == ADDR_RESULT && bridge.has_unread() {
                bridge.drain();
            }
        } else {
            trace!(addr, "read checksum mismatch, frame ignored");
        }
        self.phase = Phase::Updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashctl_chip::frame::{encode_read, encode_write, FRAME_BITS};
    use hashctl_chip::regs::SENTINEL;

    struct Rig {
        engine: ProtocolEngine,
        regs: RegisterFile,
        bridge: ResultBridge,
        jobs: JobLatch,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                engine: ProtocolEngine::new(),
                regs: RegisterFile::new(200),
                bridge: ResultBridge::new(),
                jobs: JobLatch::new(),
            }
        }

        fn tick(&mut self, input: LinkInput) -> LinkOutput {
            self.engine
                .tick(input, &mut self.regs, &mut self.bridge, &mut self.jobs)
        }

        /// One full access pass; returns the 38 bits shifted out.
        fn transact(&mut self, frame_in: u64) -> u64 {
            self.tick(LinkInput::capture());
            let mut out = 0u64;
            for n in 0..FRAME_BITS {
                let o = self.tick(LinkInput::shift(frame::bit(frame_in, n)));
                out |= u64::from(o.tdo) << n;
            }
            self.tick(LinkInput::update());
            self.tick(LinkInput::idle());
            out
        }
    }

    #[test]
    fn shift_rotates_lsb_first() {
        let mut rig = Rig::new();
        let out = rig.transact(encode_write(0x3, 0xCAFE_F00D));
        // nothing was selected before this pass, so the captured word is
        // the reserved sentinel
        assert_eq!(out & 0xFFFF_FFFF, u64::from(SENTINEL));
        assert_eq!(rig.regs.read(0x3), 0xCAFE_F00D);
    }

    #[test]
    fn capture_resets_address_latch() {
        let mut rig = Rig::new();
        rig.transact(encode_read(0x5));
        assert_eq!(rig.engine.current_address(), 0x5);
        rig.tick(LinkInput::capture());
        assert_eq!(rig.engine.current_address(), ADDR_NONE);
    }

    #[test]
    fn invalid_write_checksum_is_a_no_op() {
        let mut rig = Rig::new();
        let corrupt = encode_write(0x4, 0x1111_1111) ^ (1 << frame::CHECKSUM_SHIFT);
        rig.transact(corrupt);
        assert_eq!(rig.regs.read(0x4), 0);
        assert_eq!(rig.engine.current_address(), ADDR_NONE, "no address latched");
    }

    #[test]
    fn short_read_never_decodes_as_write() {
        // the 6-bit read parity covers the write flag, so a frame whose
        // top bits claim "write" cannot slip through the read path
        let mut rig = Rig::new();
        let forged = encode_read(0x4) | (1 << frame::WRITE_SHIFT);
        rig.transact(forged);
        assert_eq!(rig.regs.read(0x4), 0, "forged frame must not write");
    }

    #[test]
    fn reset_preempts_mid_shift() {
        let mut rig = Rig::new();
        rig.tick(LinkInput::capture());
        for n in 0..20 {
            rig.tick(LinkInput::shift(frame::bit(encode_write(0x2, 0xFFFF_FFFF), n)));
        }
        rig.tick(LinkInput::reset());
        assert_eq!(rig.engine.phase(), Phase::Idle);
        // frame is zero: the next shift-out stream is all zeros
        let o = rig.tick(LinkInput::shift(false));
        assert!(!o.tdo);
    }

    #[test]
    fn phase_cycle() {
        let mut rig = Rig::new();
        assert_eq!(rig.engine.phase(), Phase::Idle);
        rig.tick(LinkInput::capture());
        assert_eq!(rig.engine.phase(), Phase::Captured);
        rig.tick(LinkInput::shift(false));
        assert_eq!(rig.engine.phase(), Phase::Shifting);
        rig.tick(LinkInput::update());
        assert_eq!(rig.engine.phase(), Phase::Updated);
        rig.tick(LinkInput::idle());
        assert_eq!(rig.engine.phase(), Phase::Idle);
    }
}

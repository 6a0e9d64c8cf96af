//! Host side of the link.
//!
//! Everything the external master does, expressed against
//! [`Controller::tick_link`]: one `transact` primitive (capture, 38 shift
//! steps, update) and register accesses built on top of it. Used by the
//! integration tests and the CLI; a real deployment would drive the same
//! pulse sequence over the physical transport.
//!
//! A register read takes two passes by design: the update of the first
//! pass latches the address, the capture of the second pass serves the
//! value.

use crate::device::Controller;
use crate::protocol::LinkInput;
use hashctl_chip::frame::{self, encode_read, encode_write, FRAME_BITS};
use tracing::trace;

/// One full access pass: capture, shift `frame_in` LSB-first, update.
///
/// Returns the 38 bits that came out — the capture of whatever address the
/// *previous* pass selected.
pub fn transact(ctl: &mut Controller, frame_in: u64) -> u64 {
    ctl.tick_link(LinkInput::capture());
    let mut out = 0u64;
    for n in 0..FRAME_BITS {
        let o = ctl.tick_link(LinkInput::shift(frame::bit(frame_in, n)));
        out |= u64::from(o.tdo) << n;
    }
    ctl.tick_link(LinkInput::update());
    ctl.tick_link(LinkInput::idle());
    trace!(
        sent = format_args!("{frame_in:#012x}"),
        got = format_args!("{out:#012x}"),
        "transaction"
    );
    out
}

/// Write one register.
pub fn write_reg(ctl: &mut Controller, addr: u8, value: u32) {
    transact(ctl, encode_write(addr, value));
}

/// Latch `addr` for the next capture without reading anything back.
pub fn select_read(ctl: &mut Controller, addr: u8) {
    transact(ctl, encode_read(addr));
}

/// Read one register (two passes: select, then capture).
pub fn read_reg(ctl: &mut Controller, addr: u8) -> u32 {
    select_read(ctl, addr);
    frame::payload(transact(ctl, encode_read(addr)))
}

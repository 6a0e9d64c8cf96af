//! Register-access protocol tests
//!
//! Round-trips, checksum no-ops, and result-register addressing, driven
//! through the host-side transaction helpers.

use hashctl_chip::frame::{self, encode_read, encode_write};
use hashctl_link::wire::{ADDR_RESULT, SENTINEL, VERSION_WORD};
use hashctl_link::{host, Controller, CoreInput, FreqConfig, LinkInput};

fn device() -> Controller {
    Controller::new(FreqConfig::new(100, 400, 200).expect("valid config"))
}

#[test]
fn write_read_round_trip_all_writable_registers() {
    let mut ctl = device();
    for addr in (0x1..=0xB).chain([0xD]) {
        let value = 0xC0DE_0000 | u32::from(addr);
        host::write_reg(&mut ctl, addr, value);
        assert_eq!(
            host::read_reg(&mut ctl, addr),
            value,
            "round trip through address {addr:#x}"
        );
    }
}

#[test]
fn clock_register_reads_back_raw() {
    // clamping happens in the frequency sequencer, never in the file
    let mut ctl = device();
    host::write_reg(&mut ctl, 0xD, 100_000);
    assert_eq!(host::read_reg(&mut ctl, 0xD), 100_000);
}

#[test]
fn version_and_reserved_registers() {
    let mut ctl = device();
    assert_eq!(host::read_reg(&mut ctl, 0x0), VERSION_WORD);
    assert_eq!(host::read_reg(&mut ctl, 0xC), SENTINEL);
    assert_eq!(host::read_reg(&mut ctl, 0xF), SENTINEL);
}

#[test]
fn corrupt_checksum_changes_nothing() {
    let mut ctl = device();
    host::write_reg(&mut ctl, 0x3, 0x3333_3333);
    host::write_reg(&mut ctl, 0xD, 250);
    let before = ctl.snapshot();

    // flip only the checksum bit of otherwise-valid frames
    let bad_write = encode_write(0x3, 0x4444_4444) ^ (1 << frame::CHECKSUM_SHIFT);
    let bad_commit = encode_write(0xB, 0x5555_5555) ^ (1 << frame::CHECKSUM_SHIFT);
    let bad_read = encode_read(0x3) ^ (1 << frame::CHECKSUM_SHIFT);
    host::transact(&mut ctl, bad_write);
    host::transact(&mut ctl, bad_commit);
    host::transact(&mut ctl, bad_read);

    // capture resets the address latch on every pass; that is protocol
    // behavior, not state. Everything else must be untouched.
    let mut after = ctl.snapshot();
    after.current_address = before.current_address;
    assert_eq!(after, before, "malformed frames must be no-ops");
    assert_eq!(host::read_reg(&mut ctl, 0x3), 0x3333_3333);
}

#[test]
fn corrupt_frame_works_as_side_effect_free_probe() {
    // a frame with a deliberately bad checksum still shifts the captured
    // word out, so the host can peek without consequences
    let mut ctl = device();
    host::write_reg(&mut ctl, 0x7, 0x7777_7777);
    host::select_read(&mut ctl, 0x7);
    let probe = encode_read(0xF) ^ (1 << frame::CHECKSUM_SHIFT);
    let out = host::transact(&mut ctl, probe);
    assert_eq!(frame::payload(out), 0x7777_7777);
    // and the probe latched nothing: the next capture reads the idle addr
    let out = host::transact(&mut ctl, encode_read(0x0));
    assert_eq!(frame::payload(out), SENTINEL);
}

#[test]
fn writes_to_ro_registers_are_silent_no_ops() {
    let mut ctl = device();
    let before = ctl.snapshot();
    for addr in [0x0_u8, 0xC, 0xE, 0xF] {
        host::write_reg(&mut ctl, addr, 0xDEAD_BEEF);
    }
    // the address latch legitimately moves on a valid write frame; mask it
    let mut after = ctl.snapshot();
    after.current_address = before.current_address;
    assert_eq!(after, before);
}

#[test]
fn empty_result_register_reads_sentinel() {
    let mut ctl = device();
    assert_eq!(host::read_reg(&mut ctl, 0xE), SENTINEL);
    // and again — draining an empty bridge must not conjure data
    assert_eq!(host::read_reg(&mut ctl, 0xE), SENTINEL);
}

#[test]
fn result_select_before_crossing_preserves_freshness() {
    let mut ctl = device();

    // drive the read-E frame up to (not including) its update
    ctl.tick_link(LinkInput::capture());
    let select = encode_read(ADDR_RESULT);
    for n in 0..38 {
        ctl.tick_link(LinkInput::shift(frame::bit(select, n)));
    }
    // the result lands now, too late for this pass's update to see it
    ctl.tick_core(CoreInput::result(0xBEEF_BEEF));
    ctl.tick_link(LinkInput::update());

    // the un-crossed result was not drained away: this pass captures the
    // sentinel, and its own update (result now crossed) drains for real
    let out = host::transact(&mut ctl, encode_read(ADDR_RESULT));
    assert_eq!(frame::payload(out), SENTINEL, "nothing was held yet");

    // ...and the next capture delivers it intact
    let out = host::transact(&mut ctl, encode_read(ADDR_RESULT));
    assert_eq!(frame::payload(out), 0xBEEF_BEEF);
}

#[test]
fn result_is_drained_exactly_once() {
    let mut ctl = device();
    ctl.tick_core(CoreInput::result(0x0000_1234));
    assert_eq!(host::read_reg(&mut ctl, 0xE), 0x0000_1234);
    assert_eq!(host::read_reg(&mut ctl, 0xE), SENTINEL);
}

#[test]
fn reset_clears_only_the_in_flight_frame() {
    let mut ctl = device();
    host::write_reg(&mut ctl, 0x2, 0x2222_2222);

    // abandon a half-shifted destructive write
    ctl.tick_link(LinkInput::capture());
    let doomed = encode_write(0x2, 0xFFFF_FFFF);
    for n in 0..20 {
        ctl.tick_link(LinkInput::shift(frame::bit(doomed, n)));
    }
    ctl.tick_link(LinkInput::reset());

    assert_eq!(host::read_reg(&mut ctl, 0x2), 0x2222_2222);
}

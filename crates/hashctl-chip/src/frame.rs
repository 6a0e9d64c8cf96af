//! The 38-bit transfer frame.
//!
//! One frame carries one register access:
//!
//! ```text
//! bit 37        36      35..32    31..0
//! ┌─────────┬───────┬─────────┬──────────┐
//! │checksum │ write │ address │ payload  │
//! └─────────┴───────┴─────────┴──────────┘
//! ```
//!
//! Frames shift LSB-first in both directions: bit 0 leaves on the serial
//! output while the incoming bit enters at bit 37, so a full 38-step pass
//! behaves as a rotate — the captured register value streams out while the
//! request streams in.
//!
//! ## Parities
//!
//! Two parity accumulators guard the frame, both seeded with 1 and valid
//! when they end at 1 (even coverage parity):
//!
//! * **full** — covers all 38 bits, checksum bit included (it is simply
//!   the last bit shifted in). Validates writes, so any single-bit error
//!   in address or payload is caught.
//! * **partial** — covers only the top 6 bits: checksum, write flag, and
//!   address. Validates reads, whose payload bits are don't-care. The
//!   write flag and address are deliberately inside the scope; an earlier
//!   revision that omitted them could misdecode short read requests as
//!   writes.
//!
//! A frame failing its parity is silently ignored by the device, which
//! makes a deliberately-corrupt frame a side-effect-free probe.

/// Total frame length in bits.
pub const FRAME_BITS: u32 = 38;

/// Mask selecting all 38 frame bits of a `u64` carrier.
pub const FRAME_MASK: u64 = (1 << FRAME_BITS) - 1;

/// Bit position of the payload field (32 bits wide).
pub const PAYLOAD_SHIFT: u32 = 0;
/// Bit position of the address field (4 bits wide).
pub const ADDR_SHIFT: u32 = 32;
/// Bit position of the write flag.
pub const WRITE_SHIFT: u32 = 36;
/// Bit position of the checksum bit.
pub const CHECKSUM_SHIFT: u32 = 37;

/// Payload field of a frame.
#[must_use]
pub fn payload(frame: u64) -> u32 {
    (frame & 0xFFFF_FFFF) as u32
}

/// Address field of a frame.
#[must_use]
pub fn address(frame: u64) -> u8 {
    ((frame >> ADDR_SHIFT) & 0xF) as u8
}

/// Write flag of a frame.
#[must_use]
pub fn is_write(frame: u64) -> bool {
    (frame >> WRITE_SHIFT) & 1 == 1
}

/// Checksum bit of a frame.
#[must_use]
pub fn checksum_bit(frame: u64) -> bool {
    (frame >> CHECKSUM_SHIFT) & 1 == 1
}

/// Full parity over all 38 bits, seed 1. Valid ⇔ `true`.
#[must_use]
pub fn full_parity(frame: u64) -> bool {
    (1 ^ (frame & FRAME_MASK).count_ones()) & 1 == 1
}

/// Partial parity over the top 6 bits (checksum, write, address), seed 1.
/// Valid ⇔ `true`.
#[must_use]
pub fn partial_parity(frame: u64) -> bool {
    (1 ^ ((frame >> ADDR_SHIFT) & 0x3F).count_ones()) & 1 == 1
}

/// Encode a write frame with a correct checksum bit.
#[must_use]
pub fn encode_write(addr: u8, value: u32) -> u64 {
    let body = u64::from(value)
        | (u64::from(addr & 0xF) << ADDR_SHIFT)
        | (1 << WRITE_SHIFT);
    // checksum bit = parity of the other 37 bits, so full parity lands even
    body | (u64::from(body.count_ones() & 1) << CHECKSUM_SHIFT)
}

/// Encode a read-select frame with a correct checksum bit.
///
/// The payload is left zero; only the top 6 bits matter to the device.
#[must_use]
pub fn encode_read(addr: u8) -> u64 {
    let body = u64::from(addr & 0xF) << ADDR_SHIFT;
    body | (u64::from((body >> ADDR_SHIFT).count_ones() & 1) << CHECKSUM_SHIFT)
}

/// Bit `n` of a frame, LSB-first shift order.
#[must_use]
pub fn bit(frame: u64, n: u32) -> bool {
    (frame >> n) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_frames_carry_valid_full_parity() {
        for addr in 0..16u8 {
            for &value in &[0u32, 1, 0xDEAD_BEEF, 0xFFFF_FFFF, 0x8000_0001] {
                let f = encode_write(addr, value);
                assert!(full_parity(f), "addr {addr:#x} value {value:#010x}");
                assert!(is_write(f));
                assert_eq!(address(f), addr);
                assert_eq!(payload(f), value);
            }
        }
    }

    #[test]
    fn read_frames_carry_valid_partial_parity() {
        for addr in 0..16u8 {
            let f = encode_read(addr);
            assert!(partial_parity(f), "addr {addr:#x}");
            assert!(!is_write(f));
            assert_eq!(address(f), addr);
            assert_eq!(payload(f), 0);
        }
    }

    #[test]
    fn flipping_any_bit_breaks_full_parity() {
        let f = encode_write(0xB, 0x1234_5678);
        for n in 0..FRAME_BITS {
            assert!(!full_parity(f ^ (1 << n)), "bit {n} flip went unnoticed");
        }
    }

    #[test]
    fn flipping_checksum_bit_breaks_partial_parity() {
        let f = encode_read(0x5);
        assert!(!partial_parity(f ^ (1 << CHECKSUM_SHIFT)));
    }

    #[test]
    fn partial_parity_ignores_payload() {
        let f = encode_read(0xE);
        assert!(partial_parity(f | 0xABCD_EF01));
    }
}

//! Register map of the control link.
//!
//! Sixteen 32-bit slots behind a 4-bit address. The map is fixed:
//!
//! ```text
//! addr  name           access  semantics
//! ────  ─────────────  ──────  ─────────────────────────────────────────
//!  0    version        RO      constant identity word
//!  1–8  midstate[0..7] RW      256-bit hash midstate
//!  9–A  data[0..1]     RW      lower 64 bits of block data
//!  B    data[2]        RW*     upper 32 bits; writing commits the job
//!  C    reserved       RO      sentinel
//!  D    clock_config   RW      requested core frequency in MHz
//!  E    result         RO      last result, drained on read
//!  F    reserved       RO      sentinel, idle value of the address latch
//! ```
//!
//! Register B must always be written last: it is the sole job-commit
//! trigger. Midstate/data writes without a following B-write never reach
//! the hashing core.

/// Identity word read back from address 0.
pub const VERSION_WORD: u32 = 0x0100_0001;

/// "No data" / reserved-read value. Also the result sentinel: a produced
/// result equal to this value is indistinguishable from absence (accepted
/// 1-in-2^32 loss).
pub const SENTINEL: u32 = 0xFFFF_FFFF;

/// Number of addressable registers.
pub const REG_COUNT: usize = 16;

/// Number of 32-bit midstate words.
pub const MIDSTATE_WORDS: usize = 8;

/// Number of 32-bit block-data words.
pub const DATA_WORDS: usize = 3;

// ── Addresses ────────────────────────────────────────────────────────────────

/// Identity register.
pub const ADDR_VERSION: u8 = 0x0;
/// First midstate word; midstate occupies addresses 1..=8.
pub const ADDR_MIDSTATE_BASE: u8 = 0x1;
/// First block-data word; data[0..1] occupy addresses 9..=0xA.
pub const ADDR_DATA_BASE: u8 = 0x9;
/// Third block-data word. Writing here commits the job.
pub const ADDR_JOB_COMMIT: u8 = 0xB;
/// Reserved, reads the sentinel.
pub const ADDR_RESERVED_C: u8 = 0xC;
/// Requested core frequency in MHz, raw readback.
pub const ADDR_CLOCK: u8 = 0xD;
/// Result register, drained by read.
pub const ADDR_RESULT: u8 = 0xE;
/// Reserved, reads the sentinel. Reset/idle value of the address latch.
pub const ADDR_NONE: u8 = 0xF;

/// Access class of one register slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Host-readable constant or status.
    ReadOnly,
    /// Host read/write storage.
    ReadWrite,
    /// Read/write, and writing additionally commits the job.
    ReadWriteCommit,
    /// Reserved slot; reads the sentinel, writes are ignored.
    Reserved,
}

/// Access class for a 4-bit address.
#[must_use]
pub fn access(addr: u8) -> Access {
    match addr & 0xF {
        ADDR_VERSION | ADDR_RESULT => Access::ReadOnly,
        ADDR_JOB_COMMIT => Access::ReadWriteCommit,
        ADDR_RESERVED_C | ADDR_NONE => Access::Reserved,
        _ => Access::ReadWrite, // 1..=8, 9..=A, D
    }
}

/// True if a host write to `addr` stores anything.
#[must_use]
pub fn is_writable(addr: u8) -> bool {
    matches!(access(addr), Access::ReadWrite | Access::ReadWriteCommit)
}

//! Deterministic multi-domain tick scheduler.
//!
//! The three domains free-run at unrelated rates in hardware. For the
//! simulation that becomes: a global tick counter, one period per domain,
//! and a domain fires on every global tick its period divides. Identical
//! periods reproduce identical interleavings, which is the whole point —
//! the crossing races are exercised on purpose, at chosen alignments,
//! rather than left to a thread scheduler.

/// Which domains fire on one global tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSet {
    /// Control-link domain fires.
    pub link: bool,
    /// Hashing-core domain fires.
    pub core: bool,
    /// Frequency-programming domain fires.
    pub clock: bool,
}

/// Global ticks per domain tick. A period of 1 fires every global tick.
#[derive(Debug, Clone, Copy)]
pub struct TickRates {
    /// Control-link period.
    pub link: u32,
    /// Hashing-core period.
    pub core: u32,
    /// Frequency-programming period.
    pub clock: u32,
}

impl Default for TickRates {
    fn default() -> Self {
        Self { link: 1, core: 1, clock: 1 }
    }
}

/// Deterministic interleaver over the three domains.
#[derive(Debug)]
pub struct Scheduler {
    rates: TickRates,
    tick: u64,
}

impl Scheduler {
    /// Scheduler with the given relative rates. Zero periods are treated
    /// as 1.
    #[must_use]
    pub fn new(rates: TickRates) -> Self {
        Self {
            rates: TickRates {
                link: rates.link.max(1),
                core: rates.core.max(1),
                clock: rates.clock.max(1),
            },
            tick: 0,
        }
    }

    /// Global ticks elapsed.
    #[must_use]
    pub fn elapsed(&self) -> u64 {
        self.tick
    }

    /// Advance one global tick; the caller steps each fired domain.
    pub fn advance(&mut self) -> DomainSet {
        let t = self.tick;
        self.tick += 1;
        DomainSet {
            link: t % u64::from(self.rates.link) == 0,
            core: t % u64::from(self.rates.core) == 0,
            clock: t % u64::from(self.rates.clock) == 0,
        }
    }
}

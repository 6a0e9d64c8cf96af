// SPDX-License-Identifier: AGPL-3.0-only

//! Job commit and the control→core crossing.
//!
//! A [`Job`] is the atomic 352-bit payload the hashing core works on:
//! 256 bits of midstate plus 96 bits of block data. Jobs exist only as the
//! result of a commit write (register B); they are superseded, never
//! mutated.
//!
//! [`JobLatch`] carries the committed job into the core domain. On every
//! core tick the latest committed job flows through a two-stage copy
//! pipeline while the commit toggle goes through the three-stage
//! [`ToggleSync`]; the `new_job` pulse comes off the synchronizer edge, and
//! because the data pipeline settles no later than the edge becomes
//! visible, the core never observes a torn mixture of old and new job bits.

use crate::sync::ToggleSync;
use hashctl_chip::regs::{DATA_WORDS, MIDSTATE_WORDS};
use tracing::debug;

/// One unit of work for the hashing core: midstate plus block data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Job {
    /// 256-bit hash midstate, register order.
    pub midstate: [u32; MIDSTATE_WORDS],
    /// 96-bit block data, register order; `data[2]` is the commit payload.
    pub data: [u32; DATA_WORDS],
}

impl Job {
    /// All eleven 32-bit words, midstate first.
    #[must_use]
    pub fn words(&self) -> [u32; MIDSTATE_WORDS + DATA_WORDS] {
        let mut w = [0u32; MIDSTATE_WORDS + DATA_WORDS];
        w[..MIDSTATE_WORDS].copy_from_slice(&self.midstate);
        w[MIDSTATE_WORDS..].copy_from_slice(&self.data);
        w
    }
}

/// Double-buffered job hand-off into the core domain.
#[derive(Debug, Default)]
pub struct JobLatch {
    // control-domain side
    committed: Job,
    toggle: bool,
    // core-domain side
    stage1: Job,
    stage2: Job,
    sync: ToggleSync,
}

impl JobLatch {
    /// Latch with an all-zero job and no pending change.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new job (control domain, register-B write path only).
    ///
    /// Flips the change toggle; the core domain sees the pulse a few of its
    /// own ticks later.
    pub fn commit(&mut self, job: Job) {
        self.committed = job;
        self.toggle = !self.toggle;
        debug!(toggle = self.toggle, "job committed");
    }

    /// Current commit toggle (control domain).
    #[must_use]
    pub fn toggle(&self) -> bool {
        self.toggle
    }

    /// Advance the core-domain side by one tick.
    ///
    /// Returns the job as the core sees it and whether this tick carries
    /// the one-tick `new_job` pulse. The data copy runs before the edge is
    /// evaluated, so a `true` pulse always accompanies fully settled data.
    pub fn tick_core(&mut self) -> (Job, bool) {
        self.stage2 = self.stage1;
        self.stage1 = self.committed;
        self.sync.sample(self.toggle);
        let pulse = self.sync.edge();
        if pulse {
            debug!("new job visible to core");
        }
        (self.stage2, pulse)
    }
}

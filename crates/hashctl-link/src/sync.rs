// SPDX-License-Identifier: AGPL-3.0-only

//! Toggle synchronization across clock domains.
//!
//! The only legal way for a level to cross between domains here: the
//! sending domain flips a toggle, the receiving domain samples it through a
//! three-stage shift register once per *its own* tick, and an event is a
//! detected edge between the two most recently settled stages. The edge
//! pulse is exactly one receiver tick wide.
//!
//! This models the hardware's metastability chain only at the contract
//! level — what matters to callers is the latency (an edge becomes visible
//! two to three receiver ticks after the flip) and the one-tick pulse
//! shape, not flip-flop depth.

/// Three-stage synchronizer with edge detection.
///
/// `sample` must be called exactly once per receiver-domain tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleSync {
    stages: [bool; 3],
}

impl ToggleSync {
    /// Synchronizer with all stages low.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the sender's current toggle level in by one stage.
    pub fn sample(&mut self, level: bool) {
        self.stages[2] = self.stages[1];
        self.stages[1] = self.stages[0];
        self.stages[0] = level;
    }

    /// True for exactly the one tick on which a toggle flip has settled.
    #[must_use]
    pub fn edge(&self) -> bool {
        self.stages[2] ^ self.stages[1]
    }
}

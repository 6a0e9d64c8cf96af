// SPDX-License-Identifier: AGPL-3.0-only

//! Result hand-off from the core domain to the control domain.
//!
//! The core publishes `(value, strobe)` pairs, one strobe per result.
//! Crossing mechanism: the publish flips a toggle; the control domain
//! samples the toggle through a [`ToggleSync`] once per link tick and
//! clears its `empty` flag on the detected edge. A drain — raised by the
//! protocol engine when a checksum-valid read request selects the result
//! register — copies whatever value the core side holds *at that moment*
//! into a single holding slot and re-asserts `empty`.
//!
//! Deliberate properties, kept from the hardware:
//!
//! * **Single slot.** A second result published before a drain overwrites
//!   the first. At most one result is ever buffered.
//! * **Drain race.** The core may overwrite its value register on the very
//!   step a drain samples it; whichever value is present wins. Accepted
//!   hazard, not a bug.
//! * **Sentinel suppression.** A result equal to the no-data sentinel is
//!   dropped at publish; the host cannot tell it from absence.

use crate::sync::ToggleSync;
use hashctl_chip::regs::SENTINEL;
use tracing::{debug, trace};

/// Single-slot result crossing, core domain → control domain.
#[derive(Debug)]
pub struct ResultBridge {
    // core-domain side
    latest: u32,
    toggle: bool,
    // control-domain side
    sync: ToggleSync,
    empty: bool,
    hold: u32,
}

impl Default for ResultBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultBridge {
    /// Empty bridge; reads before any result return the sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latest: SENTINEL,
            toggle: false,
            sync: ToggleSync::new(),
            empty: true,
            hold: SENTINEL,
        }
    }

    /// Publish one result (core domain, one call per strobe).
    ///
    /// Sentinel values are suppressed here and never become visible.
    pub fn publish(&mut self, value: u32) {
        if value == SENTINEL {
            trace!("sentinel-valued result suppressed");
            return;
        }
        self.latest = value;
        self.toggle = !self.toggle;
        debug!(value = format_args!("{value:#010x}"), "result published");
    }

    /// Advance the control-domain synchronizer by one link tick.
    pub fn tick_sync(&mut self) {
        self.sync.sample(self.toggle);
        if self.sync.edge() {
            self.empty = false;
        }
    }

    /// True once a published result has crossed into the control domain
    /// and has not been drained.
    #[must_use]
    pub fn has_unread(&self) -> bool {
        !self.empty
    }

    /// Drain: latch the core side's current value into the holding slot
    /// and mark the bridge empty. Caller is responsible for all gating.
    pub fn drain(&mut self) {
        self.hold = self.latest;
        self.empty = true;
        trace!(value = format_args!("{:#010x}", self.hold), "result drained");
    }

    /// Consume the holding slot (register-E capture path). Reverts to the
    /// sentinel so a value is served exactly once.
    pub fn take_hold(&mut self) -> u32 {
        std::mem::replace(&mut self.hold, SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(b: &mut ResultBridge) {
        for _ in 0..4 {
            b.tick_sync();
        }
    }

    #[test]
    fn publish_becomes_visible_after_synchronizer_latency() {
        let mut b = ResultBridge::new();
        b.publish(0x1234);
        assert!(!b.has_unread(), "must not be visible before the sync settles");
        settle(&mut b);
        assert!(b.has_unread());
        b.drain();
        assert_eq!(b.take_hold(), 0x1234);
        assert!(!b.has_unread());
    }

    #[test]
    fn sentinel_publish_is_invisible() {
        let mut b = ResultBridge::new();
        b.publish(SENTINEL);
        settle(&mut b);
        assert!(!b.has_unread());
        assert_eq!(b.take_hold(), SENTINEL);
    }

    #[test]
    fn second_publish_overwrites_first() {
        let mut b = ResultBridge::new();
        b.publish(0xAAAA_AAAA);
        settle(&mut b);
        b.publish(0x5555_5555);
        settle(&mut b);
        b.drain();
        assert_eq!(b.take_hold(), 0x5555_5555, "drain must yield the latest value");
    }

    #[test]
    fn hold_is_served_exactly_once() {
        let mut b = ResultBridge::new();
        b.publish(7);
        settle(&mut b);
        b.drain();
        assert_eq!(b.take_hold(), 7);
        assert_eq!(b.take_hold(), SENTINEL);
    }

    #[test]
    fn publish_on_drain_tick_wins_or_loses_atomically() {
        // the documented race: whichever value is present at the sampled
        // step wins, but never a mixture
        let mut b = ResultBridge::new();
        b.publish(0xFFFF_0000);
        settle(&mut b);
        b.publish(0x0000_FFFF); // same control step as the drain below
        b.drain();
        let got = b.take_hold();
        assert_eq!(got, 0x0000_FFFF, "the value present at the drain step wins");
    }
}

//! Wire-level model of the hashing-accelerator control link.
//!
//! This crate has **no dependencies** and **no hardware access** — it is a
//! pure model of what crosses the wire: the 16-entry register map, the
//! 38-bit bit-serial transfer frame with its two parity schemes, and the
//! 27-step load program the frequency synthesizer expects.
//!
//! The behavioral side (the protocol engine, the clock-domain crossings,
//! the frequency sequencer) lives in `hashctl-link`; everything here is
//! constants and pure functions so that host tools and the engine agree on
//! one definition of the formats.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`regs`] | Register map — addresses, access classes, sentinels |
//! | [`frame`] | 38-bit transfer frame — field layout, parities, encode |
//! | [`synth`] | Synthesizer load program — 16-bit word, pulse schedule |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod frame;
pub mod regs;
pub mod synth;

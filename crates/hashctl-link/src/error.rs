//! Error types for control-link operations.
//!
//! Protocol faults (bad checksum, writes to read-only registers) are never
//! errors — the link has no side channel to report them, so they degrade to
//! silent no-ops inside the engine. `LinkError` covers the surfaces that
//! *can* fail: construction-time configuration and host-side frame input.

use thiserror::Error;

/// Result type alias for control-link operations.
pub type Result<T> = std::result::Result<T, LinkError>;

/// Errors that can occur outside the wire protocol itself.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Frequency configuration outside the synthesizer's programmable range
    #[error("Invalid frequency config: {reason}")]
    InvalidFrequencyConfig {
        /// What was out of range
        reason: String,
    },

    /// Host-supplied frame text could not be parsed
    #[error("Malformed frame: {reason}")]
    MalformedFrame {
        /// Why parsing failed
        reason: String,
    },
}

impl LinkError {
    /// Create an invalid-frequency-config error
    pub fn invalid_frequency_config(reason: impl Into<String>) -> Self {
        Self::InvalidFrequencyConfig {
            reason: reason.into(),
        }
    }

    /// Create a malformed-frame error
    pub fn malformed_frame(reason: impl Into<String>) -> Self {
        Self::MalformedFrame {
            reason: reason.into(),
        }
    }
}

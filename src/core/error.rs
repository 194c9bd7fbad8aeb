//! Error types shared across the reminder engine.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use thiserror::Error;

/// Errors surfaced by the reminder engine.
///
/// `Validation` is returned synchronously to the creator of a reminder and
/// always means no record was persisted and no timer started. `StorageCorrupt`
/// is fatal during startup: the bot must not come up with a silently empty
/// reminder set when the file exists but cannot be read. `Delivery` covers a
/// single failed firing and is never fatal to the timer that produced it.
#[derive(Debug, Error)]
pub enum ChimeError {
    /// Malformed or contextually invalid reminder input.
    #[error("invalid reminder input: {0}")]
    Validation(String),

    /// The reminder file exists but could not be parsed.
    #[error("reminder storage is corrupt: {0}")]
    StorageCorrupt(String),

    /// Reading or writing the reminder file failed.
    #[error("reminder storage I/O failed: {0}")]
    Storage(#[from] std::io::Error),

    /// The reminder set could not be encoded for persistence.
    #[error("failed to encode reminder set: {0}")]
    Encode(#[from] serde_json::Error),

    /// The delivery sink failed for one firing.
    #[error("delivery to channel {channel_id} failed: {reason}")]
    Delivery { channel_id: String, reason: String },
}

impl ChimeError {
    /// Shorthand for a validation error with a user-facing reason.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

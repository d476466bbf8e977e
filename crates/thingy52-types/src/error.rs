//! Error types for payload and wire-code parsing.

use thiserror::Error;

/// Errors that can occur when decoding driver callback payloads or
/// wire codes.
///
/// This error type is transport-agnostic and does not include bridge
/// errors (those belong in thingy52-core).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A callback payload did not match the shape defined for its event kind.
    #[error("invalid {event} payload: {message}")]
    InvalidPayload {
        /// The event kind the payload was delivered for.
        event: &'static str,
        /// Description of the mismatch.
        message: String,
    },

    /// Color wire code outside the defined palette (1-7).
    #[error("unknown color code: {0}")]
    UnknownColorCode(u8),

    /// LED mode wire code outside the defined modes (0-3).
    #[error("unknown LED mode code: {0}")]
    UnknownLedModeCode(u8),
}

/// Result type alias using thingy52-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

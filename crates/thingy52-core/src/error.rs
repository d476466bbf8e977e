//! Error types for thingy52-core.
//!
//! The error surface is deliberately narrow. Fire-and-forget commands
//! (LED, beep, disconnect) have no failure channel: the browser executes
//! them on its own event loop and any failure there is invisible to the
//! facade. The operations that CAN fail are the ones with a result
//! channel — driver load, scan — plus payload delivery at the proxy.

use thiserror::Error;

use thingy52_types::ParseError;

/// Errors surfaced by the facade and the bridge seam.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The browser rejected the discovery-and-pair sequence.
    ///
    /// The reason string is whatever the browser driver reported, verbatim.
    /// The attempt is not retried.
    #[error("Bluetooth scan failed: '{reason}'")]
    ScanFailed {
        /// Browser-reported failure reason.
        reason: String,
    },

    /// The driver bootstrap could not be injected into the page.
    ///
    /// The integration is non-functional without the driver, so this aborts
    /// facade construction.
    #[error("driver load failed: {reason}")]
    DriverLoad {
        /// Description of the load failure.
        reason: String,
    },

    /// A script call with a result channel was rejected by the page.
    #[error("script rejected: {reason}")]
    ScriptRejected {
        /// Browser-reported rejection reason.
        reason: String,
    },

    /// The scan resolved with something other than an identifier string.
    #[error("scan resolved with non-string result: {0}")]
    UnexpectedScanResult(serde_json::Value),

    /// A driver callback arrived under a name outside the contract.
    #[error("unknown driver callback: {name}")]
    UnknownCallback {
        /// The callback name the host tried to deliver.
        name: String,
    },

    /// A driver payload failed to decode.
    #[error(transparent)]
    Payload(#[from] ParseError),
}

/// Result type alias using thingy52-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

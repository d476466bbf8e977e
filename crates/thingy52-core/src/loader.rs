//! One-time injection of the driver bootstrap into the hosting page.
//!
//! The actual Bluetooth logic lives in the browser-side `Thingy52` driver
//! object, which the hosting page loads as a JS module. The bootstrap
//! bundled here adapts that object to a proxy: it forwards the command
//! surface onto the proxy handle and re-dispatches driver events at it so
//! they reach the server as named callbacks.
//!
//! Injection happens once per facade, at construction. Without the driver
//! the integration is non-functional, so a failed load aborts
//! [`crate::Thingy52::attach`].

use tracing::debug;

use crate::bridge::{ScriptBridge, ScriptCall};
use crate::error::{Error, Result};
use crate::proxy::BridgeProxy;

/// Bootstrap source executed against the page, with the proxy bound as `$0`.
pub const INTEGRATION_SOURCE: &str = include_str!("../js/integration.js");

pub(crate) async fn load_driver(bridge: &dyn ScriptBridge, proxy: &BridgeProxy) -> Result<()> {
    debug!(proxy = %proxy.id(), "injecting driver bootstrap");
    match bridge
        .call(ScriptCall::new(INTEGRATION_SOURCE, proxy.id().clone()))
        .await
    {
        Ok(_) => Ok(()),
        Err(Error::ScriptRejected { reason }) => Err(Error::DriverLoad { reason }),
        Err(other) => Err(Error::DriverLoad {
            reason: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_wires_the_full_command_surface() {
        for entry in [
            "$0.scan",
            "$0.disconnect",
            "$0.beep",
            "$0.setLED",
            "$0.setLEDBreathe",
            "$0.setLEDFlashOnce",
            "$0.setLEDOff",
        ] {
            assert!(
                INTEGRATION_SOURCE.contains(entry),
                "bootstrap missing {entry}"
            );
        }
    }

    #[test]
    fn test_bootstrap_forwards_all_four_event_kinds() {
        for event in [
            "thingy52_battery",
            "thingy52_temperature",
            "thingy52_button",
            "thingy52_accelerometer",
        ] {
            assert!(
                INTEGRATION_SOURCE.contains(event),
                "bootstrap missing {event}"
            );
        }
    }
}

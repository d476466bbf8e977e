//! The addressable handle between the browser driver and the facade.
//!
//! A [`BridgeProxy`] is the `$0` target of every script call and the sole
//! receiver of browser-initiated callbacks. It has no visual footprint —
//! host integrations attach it to the page as an invisible element purely
//! so the driver has something to address.
//!
//! Each incoming payload is decoded into its typed event, the cached
//! device state is refreshed, and the event is dispatched to the
//! listener registry. A payload that fails to decode dispatches nothing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use serde_json::Value;
use tracing::{trace, warn};

use thingy52_types::{
    AccelerometerChange, BatteryChange, ButtonChange, ParseError, TemperatureChange,
};

use crate::bridge::ProxyId;
use crate::error::{Error, Result};
use crate::events::{EventBus, Registration};

/// Receiver side of the browser bridge.
///
/// Cloning is cheap and yields another handle onto the same listener
/// registry and cached state; the facade and the host integration share
/// one proxy per session this way.
#[derive(Clone)]
pub struct BridgeProxy {
    state: Arc<ProxyState>,
}

struct ProxyState {
    id: ProxyId,
    bus: EventBus,
    battery_level: AtomicU8,
    button_pressed: AtomicBool,
}

impl BridgeProxy {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(ProxyState {
                id: ProxyId::generate(),
                bus: EventBus::new(),
                battery_level: AtomicU8::new(0),
                button_pressed: AtomicBool::new(false),
            }),
        }
    }

    /// The handle id host bridges use to address this proxy.
    pub fn id(&self) -> &ProxyId {
        &self.state.id
    }

    /// Route a named driver callback to the matching receiver.
    ///
    /// The driver contract defines four names: `battery`, `button`,
    /// `accelerometer` and `temperature`. Anything else is an error.
    pub fn deliver(&self, callback: &str, payload: &Value) -> Result<()> {
        match callback {
            "battery" => self.battery(payload),
            "button" => self.button(payload),
            "accelerometer" => self.accelerometer(payload),
            "temperature" => self.temperature(payload),
            other => Err(Error::UnknownCallback {
                name: other.to_string(),
            }),
        }
    }

    /// Decode and dispatch a `{"batteryLevel": …}` payload.
    pub fn battery(&self, payload: &Value) -> Result<()> {
        let event =
            BatteryChange::from_payload(payload).map_err(|err| self.rejected("battery", err))?;
        self.state.battery_level.store(event.level, Ordering::Relaxed);
        trace!(proxy = %self.state.id, level = event.level, "battery change");
        self.state.bus.battery.dispatch(&event);
        Ok(())
    }

    /// Decode and dispatch a `{"pressed": …}` payload.
    pub fn button(&self, payload: &Value) -> Result<()> {
        let event =
            ButtonChange::from_payload(payload).map_err(|err| self.rejected("button", err))?;
        self.state.button_pressed.store(event.pressed, Ordering::Relaxed);
        trace!(proxy = %self.state.id, pressed = event.pressed, "button change");
        self.state.bus.button.dispatch(&event);
        Ok(())
    }

    /// Decode and dispatch a `{"x": …, "y": …, "z": …}` payload.
    pub fn accelerometer(&self, payload: &Value) -> Result<()> {
        let event = AccelerometerChange::from_payload(payload)
            .map_err(|err| self.rejected("accelerometer", err))?;
        trace!(proxy = %self.state.id, x = event.x, y = event.y, z = event.z, "accelerometer change");
        self.state.bus.accelerometer.dispatch(&event);
        Ok(())
    }

    /// Decode and dispatch a `{"temperature": …}` payload.
    pub fn temperature(&self, payload: &Value) -> Result<()> {
        let event = TemperatureChange::from_payload(payload)
            .map_err(|err| self.rejected("temperature", err))?;
        trace!(proxy = %self.state.id, celsius = event.celsius, "temperature change");
        self.state.bus.temperature.dispatch(&event);
        Ok(())
    }

    fn rejected(&self, callback: &'static str, err: ParseError) -> Error {
        warn!(proxy = %self.state.id, callback, error = %err, "malformed driver payload");
        Error::from(err)
    }

    pub(crate) fn battery_level(&self) -> u8 {
        self.state.battery_level.load(Ordering::Relaxed)
    }

    pub(crate) fn button_pressed(&self) -> bool {
        self.state.button_pressed.load(Ordering::Relaxed)
    }

    pub(crate) fn add_battery_listener(
        &self,
        listener: impl Fn(&BatteryChange) + Send + Sync + 'static,
    ) -> Registration {
        self.state.bus.battery.add(listener)
    }

    pub(crate) fn add_button_listener(
        &self,
        listener: impl Fn(&ButtonChange) + Send + Sync + 'static,
    ) -> Registration {
        self.state.bus.button.add(listener)
    }

    pub(crate) fn add_accelerometer_listener(
        &self,
        listener: impl Fn(&AccelerometerChange) + Send + Sync + 'static,
    ) -> Registration {
        self.state.bus.accelerometer.add(listener)
    }

    pub(crate) fn add_temperature_listener(
        &self,
        listener: impl Fn(&TemperatureChange) + Send + Sync + 'static,
    ) -> Registration {
        self.state.bus.temperature.add(listener)
    }
}

impl std::fmt::Debug for BridgeProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeProxy")
            .field("id", &self.state.id)
            .field("battery_level", &self.battery_level())
            .field("button_pressed", &self.button_pressed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_battery_updates_cached_state() {
        let proxy = BridgeProxy::new();
        proxy.battery(&json!({ "batteryLevel": 73 })).unwrap();
        assert_eq!(proxy.battery_level(), 73);
    }

    #[test]
    fn test_button_updates_cached_state() {
        let proxy = BridgeProxy::new();
        proxy.button(&json!({ "pressed": true })).unwrap();
        assert!(proxy.button_pressed());
        proxy.button(&json!({ "pressed": false })).unwrap();
        assert!(!proxy.button_pressed());
    }

    #[test]
    fn test_malformed_payload_dispatches_nothing() {
        let proxy = BridgeProxy::new();
        let fired = Arc::new(Mutex::new(0u32));
        let count = Arc::clone(&fired);
        let _reg = proxy.add_battery_listener(move |_| *count.lock().unwrap() += 1);

        let err = proxy.battery(&json!({ "batteryLevel": "low" })).unwrap_err();
        assert!(matches!(err, Error::Payload(_)));
        assert_eq!(*fired.lock().unwrap(), 0);
        assert_eq!(proxy.battery_level(), 0);
    }

    #[test]
    fn test_deliver_routes_by_name() {
        let proxy = BridgeProxy::new();
        proxy
            .deliver("temperature", &json!({ "temperature": 20.5 }))
            .unwrap();
        proxy
            .deliver("accelerometer", &json!({ "x": 0.0, "y": 0.0, "z": 1.0 }))
            .unwrap();

        let err = proxy
            .deliver("humidity", &json!({ "humidity": 40 }))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCallback { .. }));
    }

    #[test]
    fn test_clones_share_state() {
        let proxy = BridgeProxy::new();
        let clone = proxy.clone();
        clone.battery(&json!({ "batteryLevel": 5 })).unwrap();
        assert_eq!(proxy.battery_level(), 5);
        assert_eq!(proxy.id(), clone.id());
    }
}

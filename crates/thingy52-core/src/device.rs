//! The Thingy:52 device facade.
//!
//! This module provides the main server-side interface: typed command
//! methods marshalled into browser-script invocations, and listener
//! registration for the four sensor event kinds the driver reports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use thingy52_types::{
    AccelerometerChange, BatteryChange, ButtonChange, Color, TemperatureChange,
};

use crate::bridge::ScriptBridge;
use crate::commands;
use crate::error::{Error, Result};
use crate::events::Registration;
use crate::loader;
use crate::proxy::BridgeProxy;
use crate::util::lock;

/// Server-side facade for one paired Thingy:52.
///
/// One facade per UI session, constructed with [`Thingy52::attach`] and
/// passed by reference wherever the session needs it — never held as a
/// process-wide singleton, since the proxy binding is session state.
///
/// All command methods are fire-and-forget: they hand the script call to
/// the bridge and return. Only [`Thingy52::scan`] has a completion, with
/// exactly one success or failure per invocation. Commands issued before
/// a scan has resolved are forwarded unconditionally; whether the driver
/// accepts them is between it and the hardware.
///
/// # Note on Clone
///
/// This struct intentionally does not implement `Clone`. A facade owns
/// its proxy binding and the pairing lifecycle; share it across tasks by
/// wrapping it in `Arc` instead.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use thingy52_core::{MockBridge, Thingy52};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let bridge = Arc::new(MockBridge::new());
/// let thingy = Thingy52::attach(bridge).await?;
///
/// let device_id = thingy.scan().await?;
/// println!("paired with {device_id}");
///
/// thingy.set_led(0, 128, 255);
/// thingy.beep();
/// # Ok(())
/// # }
/// ```
pub struct Thingy52 {
    bridge: Arc<dyn ScriptBridge>,
    proxy: BridgeProxy,
    device_id: Mutex<Option<String>>,
    disconnected: AtomicBool,
}

impl Thingy52 {
    /// Bind a facade to a session's page.
    ///
    /// Creates a fresh proxy and injects the driver bootstrap bound to it.
    /// A failed load is fatal: the returned error aborts construction and
    /// the facade never exists.
    pub async fn attach(bridge: Arc<dyn ScriptBridge>) -> Result<Self> {
        let proxy = BridgeProxy::new();
        loader::load_driver(bridge.as_ref(), &proxy).await?;
        debug!(proxy = %proxy.id(), "facade attached");
        Ok(Self {
            bridge,
            proxy,
            device_id: Mutex::new(None),
            disconnected: AtomicBool::new(false),
        })
    }

    /// Start the browser-side discovery-and-pair sequence.
    ///
    /// Completes exactly once per invocation. On success the paired
    /// device's identifier is stored and returned, and the unit is made
    /// identifiable with a white LED and a default beep. On failure the
    /// browser-reported reason is carried in [`Error::ScanFailed`]; the
    /// attempt is not retried.
    pub async fn scan(&self) -> Result<String> {
        let value = match self.bridge.call(commands::scan(self.proxy.id().clone())).await {
            Ok(value) => value,
            Err(Error::ScriptRejected { reason }) => {
                return Err(Error::ScanFailed { reason });
            }
            Err(other) => return Err(other),
        };

        let Some(id) = value.as_str() else {
            return Err(Error::UnexpectedScanResult(value));
        };
        let id = id.to_string();

        *lock(&self.device_id) = Some(id.clone());
        info!(device = %id, "paired with Thingy:52");

        self.set_led(255, 255, 255);
        self.beep();

        Ok(id)
    }

    /// Ask the driver to tear down the BLE connection.
    ///
    /// Fire-and-forget: no acknowledgement is awaited and browser-side
    /// failures are not observable.
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::Relaxed);
        self.bridge.send(commands::disconnect(self.proxy.id().clone()));
    }

    /// Set the LED to a constant color from raw channel values.
    ///
    /// Channels are forwarded uninterpreted; keeping them in 0-255 is the
    /// caller's responsibility.
    pub fn set_led(&self, r: i32, g: i32, b: i32) {
        self.bridge
            .send(commands::set_led(self.proxy.id().clone(), r, g, b));
    }

    /// Breathe a palette color.
    ///
    /// `intensity` is expected in 0-100 and `period_ms` is the cycle
    /// length in milliseconds; both are forwarded uninterpreted.
    pub fn set_led_breathe(&self, color: Color, intensity: i32, period_ms: i32) {
        self.bridge.send(commands::set_led_breathe(
            self.proxy.id().clone(),
            color,
            intensity,
            period_ms,
        ));
    }

    /// Flash a palette color once.
    pub fn set_led_flash_once(&self, color: Color, intensity: i32) {
        self.bridge.send(commands::set_led_flash_once(
            self.proxy.id().clone(),
            color,
            intensity,
        ));
    }

    /// Turn the LED off.
    pub fn set_led_off(&self) {
        self.bridge.send(commands::set_led_off(self.proxy.id().clone()));
    }

    /// Beep with the driver's default tone.
    pub fn beep(&self) {
        self.bridge.send(commands::beep(self.proxy.id().clone()));
    }

    /// Beep with explicit frequency (Hz), duration (ms) and volume.
    ///
    /// All three are forwarded uninterpreted.
    pub fn beep_with(&self, frequency_hz: i32, duration_ms: i32, volume: i32) {
        self.bridge.send(commands::beep_with(
            self.proxy.id().clone(),
            frequency_hz,
            duration_ms,
            volume,
        ));
    }

    /// Register for battery level changes.
    ///
    /// Listeners fire in registration order; unsubscribe through the
    /// returned handle.
    pub fn add_battery_change_listener(
        &self,
        listener: impl Fn(&BatteryChange) + Send + Sync + 'static,
    ) -> Registration {
        self.proxy.add_battery_listener(listener)
    }

    /// Register for button presses and releases.
    pub fn add_button_listener(
        &self,
        listener: impl Fn(&ButtonChange) + Send + Sync + 'static,
    ) -> Registration {
        self.proxy.add_button_listener(listener)
    }

    /// Register for accelerometer samples.
    pub fn add_accelerometer_listener(
        &self,
        listener: impl Fn(&AccelerometerChange) + Send + Sync + 'static,
    ) -> Registration {
        self.proxy.add_accelerometer_listener(listener)
    }

    /// Register for temperature reports.
    pub fn add_temperature_listener(
        &self,
        listener: impl Fn(&TemperatureChange) + Send + Sync + 'static,
    ) -> Registration {
        self.proxy.add_temperature_listener(listener)
    }

    /// Identifier of the paired device, once a scan has resolved.
    pub fn device_id(&self) -> Option<String> {
        lock(&self.device_id).clone()
    }

    /// Last battery percentage reported by the driver.
    pub fn battery_level(&self) -> u8 {
        self.proxy.battery_level()
    }

    /// Last button state reported by the driver.
    pub fn button_pressed(&self) -> bool {
        self.proxy.button_pressed()
    }

    /// The proxy receiving this facade's driver callbacks.
    ///
    /// Host integrations route named browser calls through
    /// [`BridgeProxy::deliver`] on this handle.
    pub fn proxy(&self) -> &BridgeProxy {
        &self.proxy
    }
}

impl std::fmt::Debug for Thingy52 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thingy52")
            .field("device_id", &self.device_id())
            .field("proxy", &self.proxy.id())
            .field("disconnected", &self.disconnected.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Drop for Thingy52 {
    fn drop(&mut self) {
        // The owning view tearing down is the normal end of a session;
        // leave the BLE link closed behind us unless disconnect() already
        // ran.
        let paired = lock(&self.device_id).is_some();
        if paired && !self.disconnected.load(Ordering::Relaxed) {
            debug!(proxy = %self.proxy.id(), "facade dropped while paired, requesting disconnect");
            self.bridge.send(commands::disconnect(self.proxy.id().clone()));
        }
    }
}

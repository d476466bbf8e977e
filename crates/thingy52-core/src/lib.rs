//! Server-side facade for the Nordic Thingy:52 toy sensor.
//!
//! This crate binds a server-side session to a browser-side Web Bluetooth
//! driver: typed command methods are marshalled into script invocations
//! against the hosting page, and driver-reported sensor events come back
//! as typed events with listener registration.
//!
//! # Architecture
//!
//! - [`Thingy52`] — the device facade: scan, disconnect, LED control,
//!   beep, and listener registration for four event kinds
//! - [`BridgeProxy`] — the invisible, addressable handle the driver
//!   targets with named callbacks
//! - [`ScriptBridge`] — the seam to the hosting page, implemented by the
//!   UI integration (and by [`MockBridge`] in tests)
//!
//! The Bluetooth transport itself (GATT discovery, connection
//! negotiation) lives entirely in the browser driver and is never
//! reimplemented here.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use thingy52_core::{MockBridge, Thingy52};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // A real host supplies its own ScriptBridge; the mock stands in here.
//!     let bridge = Arc::new(MockBridge::new());
//!     let thingy = Thingy52::attach(bridge).await?;
//!
//!     let _reg = thingy.add_temperature_listener(|e| {
//!         println!("{:.1} °C", e.celsius);
//!     });
//!
//!     let device_id = thingy.scan().await?;
//!     println!("paired with {device_id}");
//!
//!     thingy.beep();
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod commands;
pub mod device;
pub mod error;
pub mod events;
pub mod loader;
pub mod mock;
pub mod proxy;
mod util;

pub use bridge::{ProxyId, ScriptBridge, ScriptCall};
pub use device::Thingy52;
pub use error::{Error, Result};
pub use events::Registration;
pub use mock::MockBridge;
pub use proxy::BridgeProxy;

// Re-export the value types so hosts only need one dependency.
pub use thingy52_types::{
    AccelerometerChange, BatteryChange, ButtonChange, Color, LedMode, ParseError,
    TemperatureChange,
};

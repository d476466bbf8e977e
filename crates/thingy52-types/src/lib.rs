//! Transport-agnostic types for the Nordic Thingy:52 browser bridge.
//!
//! This crate provides the value types shared between the server-side
//! facade (thingy52-core) and host integrations:
//!
//! - The four sensor event types and their JSON payload decoding
//! - LED mode and palette color enumerations with their wire codes
//! - Error types for payload parsing
//!
//! # Example
//!
//! ```
//! use thingy52_types::{BatteryChange, Color};
//!
//! let payload = serde_json::json!({ "batteryLevel": 87 });
//! let event = BatteryChange::from_payload(&payload).unwrap();
//! assert_eq!(event.level, 87);
//!
//! let color = Color::random();
//! assert!((1..=7).contains(&color.code()));
//! ```

pub mod error;
pub mod events;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use events::{AccelerometerChange, BatteryChange, ButtonChange, TemperatureChange};
pub use types::{Color, LedMode};

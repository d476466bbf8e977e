//! Sensor event types delivered by the browser driver.
//!
//! Each event decodes from the JSON payload the driver passes to its named
//! callback. The payload key names are part of the driver contract and are
//! preserved through serde renames, so serializing an event reproduces the
//! wire shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParseError, ParseResult};

fn decode<T: DeserializeOwned>(event: &'static str, payload: &Value) -> ParseResult<T> {
    serde_json::from_value(payload.clone()).map_err(|err| ParseError::InvalidPayload {
        event,
        message: err.to_string(),
    })
}

/// Battery level report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryChange {
    /// Charge percentage, 0-100.
    #[serde(rename = "batteryLevel")]
    pub level: u8,
}

impl BatteryChange {
    /// Decode a `{"batteryLevel": …}` callback payload.
    pub fn from_payload(payload: &Value) -> ParseResult<Self> {
        decode("battery", payload)
    }
}

/// Button press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonChange {
    /// Whether the button is currently held down.
    pub pressed: bool,
}

impl ButtonChange {
    /// Decode a `{"pressed": …}` callback payload.
    pub fn from_payload(payload: &Value) -> ParseResult<Self> {
        decode("button", payload)
    }
}

/// Accelerometer sample in g per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelerometerChange {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AccelerometerChange {
    /// Decode a `{"x": …, "y": …, "z": …}` callback payload.
    pub fn from_payload(payload: &Value) -> ParseResult<Self> {
        decode("accelerometer", payload)
    }
}

/// Ambient temperature report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureChange {
    /// Degrees Celsius.
    #[serde(rename = "temperature")]
    pub celsius: f64,
}

impl TemperatureChange {
    /// Decode a `{"temperature": …}` callback payload.
    pub fn from_payload(payload: &Value) -> ParseResult<Self> {
        decode("temperature", payload)
    }
}

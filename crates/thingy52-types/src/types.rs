//! Wire-level enumerations for the Thingy:52 LED interface.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// LED drive mode.
///
/// The numeric value is the wire code the browser driver expects. The
/// command surface selects modes implicitly (`setLED` is constant color,
/// `setLEDBreathe` is breathe, and so on); the enum documents the mapping
/// for hosts that talk to the driver directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LedMode {
    /// LED disabled.
    Off = 0,
    /// Constant color.
    On = 1,
    /// Color fading in and out on a fixed period.
    Breathe = 2,
    /// A single flash.
    FlashOnce = 3,
}

impl LedMode {
    /// The wire code sent across the browser-script boundary.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for LedMode {
    type Error = ParseError;

    /// Convert a wire code back to a `LedMode`.
    ///
    /// # Examples
    ///
    /// ```
    /// use thingy52_types::LedMode;
    ///
    /// assert_eq!(LedMode::try_from(2), Ok(LedMode::Breathe));
    /// assert!(LedMode::try_from(9).is_err());
    /// ```
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LedMode::Off),
            1 => Ok(LedMode::On),
            2 => Ok(LedMode::Breathe),
            3 => Ok(LedMode::FlashOnce),
            _ => Err(ParseError::UnknownLedModeCode(value)),
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedMode::Off => write!(f, "off"),
            LedMode::On => write!(f, "on"),
            LedMode::Breathe => write!(f, "breathe"),
            LedMode::FlashOnce => write!(f, "flash once"),
        }
    }
}

/// LED palette color.
///
/// The numeric value is the wire code the browser driver expects in
/// `setLEDBreathe` and `setLEDFlashOnce` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Purple = 5,
    Cyan = 6,
    White = 7,
}

impl Color {
    /// All palette colors, in wire-code order.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Purple,
        Color::Cyan,
        Color::White,
    ];

    /// The wire code sent across the browser-script boundary.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Pick a palette color uniformly at random.
    #[must_use]
    pub fn random() -> Self {
        Self::ALL[rand::random_range(0..Self::ALL.len())]
    }
}

impl TryFrom<u8> for Color {
    type Error = ParseError;

    /// Convert a wire code back to a `Color`.
    ///
    /// # Examples
    ///
    /// ```
    /// use thingy52_types::Color;
    ///
    /// assert_eq!(Color::try_from(7), Ok(Color::White));
    /// assert!(Color::try_from(0).is_err());
    /// ```
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Color::Red),
            2 => Ok(Color::Green),
            3 => Ok(Color::Yellow),
            4 => Ok(Color::Blue),
            5 => Ok(Color::Purple),
            6 => Ok(Color::Cyan),
            7 => Ok(Color::White),
            _ => Err(ParseError::UnknownColorCode(value)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Green => write!(f, "green"),
            Color::Yellow => write!(f, "yellow"),
            Color::Blue => write!(f, "blue"),
            Color::Purple => write!(f, "purple"),
            Color::Cyan => write!(f, "cyan"),
            Color::White => write!(f, "white"),
        }
    }
}

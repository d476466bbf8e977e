//! Script snippets understood by the loaded browser driver.
//!
//! Every snippet the facade can send lives in this table; `$0` is always
//! the bound proxy and `$1..` are positional arguments. Keeping the wire
//! strings here keeps them out of the facade methods.

use serde_json::json;

use thingy52_types::Color;

use crate::bridge::{ProxyId, ScriptCall};

/// Start discovery-and-pair; resolves with the device identifier.
pub const SCAN: &str = "return $0.scan()";

/// Tear down the BLE connection. No result.
pub const DISCONNECT: &str = "$0.disconnect()";

/// Constant color from raw channels. Args: red, green, blue.
pub const SET_LED: &str = "$0.setLED($1,$2,$3)";

/// Breathe a palette color. Args: color code, intensity, period ms.
pub const SET_LED_BREATHE: &str = "$0.setLEDBreathe($1,$2,$3)";

/// Single flash of a palette color. Args: color code, intensity.
pub const SET_LED_FLASH_ONCE: &str = "$0.setLEDFlashOnce($1,$2)";

/// LED off.
pub const SET_LED_OFF: &str = "$0.setLEDOff()";

/// Default tone.
pub const BEEP: &str = "$0.beep()";

/// Parameterized tone. Args: frequency Hz, duration ms, volume.
pub const BEEP_WITH: &str = "$0.beep($1,$2,$3)";

pub(crate) fn scan(target: ProxyId) -> ScriptCall {
    ScriptCall::new(SCAN, target)
}

pub(crate) fn disconnect(target: ProxyId) -> ScriptCall {
    ScriptCall::new(DISCONNECT, target)
}

pub(crate) fn set_led(target: ProxyId, r: i32, g: i32, b: i32) -> ScriptCall {
    ScriptCall::with_args(SET_LED, target, vec![json!(r), json!(g), json!(b)])
}

pub(crate) fn set_led_breathe(
    target: ProxyId,
    color: Color,
    intensity: i32,
    period_ms: i32,
) -> ScriptCall {
    ScriptCall::with_args(
        SET_LED_BREATHE,
        target,
        vec![json!(color.code()), json!(intensity), json!(period_ms)],
    )
}

pub(crate) fn set_led_flash_once(target: ProxyId, color: Color, intensity: i32) -> ScriptCall {
    ScriptCall::with_args(
        SET_LED_FLASH_ONCE,
        target,
        vec![json!(color.code()), json!(intensity)],
    )
}

pub(crate) fn set_led_off(target: ProxyId) -> ScriptCall {
    ScriptCall::new(SET_LED_OFF, target)
}

pub(crate) fn beep(target: ProxyId) -> ScriptCall {
    ScriptCall::new(BEEP, target)
}

pub(crate) fn beep_with(
    target: ProxyId,
    frequency_hz: i32,
    duration_ms: i32,
    volume: i32,
) -> ScriptCall {
    ScriptCall::with_args(
        BEEP_WITH,
        target,
        vec![json!(frequency_hz), json!(duration_ms), json!(volume)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippets_address_the_proxy() {
        for snippet in [
            SCAN,
            DISCONNECT,
            SET_LED,
            SET_LED_BREATHE,
            SET_LED_FLASH_ONCE,
            SET_LED_OFF,
            BEEP,
            BEEP_WITH,
        ] {
            assert!(snippet.contains("$0."), "snippet missing target: {snippet}");
        }
    }

    #[test]
    fn test_set_led_args_forwarded_verbatim() {
        let call = set_led(ProxyId::generate(), 300, -5, 128);
        assert_eq!(call.args, vec![json!(300), json!(-5), json!(128)]);
    }

    #[test]
    fn test_breathe_sends_color_wire_code() {
        let call = set_led_breathe(ProxyId::generate(), Color::Cyan, 100, 1000);
        assert_eq!(call.args, vec![json!(6), json!(100), json!(1000)]);
    }

    #[test]
    fn test_default_beep_has_no_args() {
        let call = beep(ProxyId::generate());
        assert_eq!(call.script, BEEP);
        assert!(call.args.is_empty());
    }
}

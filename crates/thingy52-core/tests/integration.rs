//! Integration tests for thingy52-core
//!
//! These tests drive the full facade -> bridge -> proxy path over a
//! MockBridge, so they run without a browser or BLE hardware.

use std::sync::{Arc, Mutex};

use serde_json::json;

use thingy52_core::commands;
use thingy52_core::{Error, MockBridge, Thingy52};

async fn attached_bridge() -> (Arc<MockBridge>, Thingy52) {
    let bridge = Arc::new(MockBridge::new());
    let thingy = Thingy52::attach(bridge.clone())
        .await
        .expect("driver load should succeed on a fresh mock");
    // Drop the bootstrap injection record so assertions see only commands.
    bridge.clear();
    (bridge, thingy)
}

// --- Scan ---

#[tokio::test]
async fn scan_stores_identifier_and_confirms_discoverably() {
    let (bridge, thingy) = attached_bridge().await;
    bridge.resolve_scan_with("AA:BB:CC");

    let id = thingy.scan().await.unwrap();

    assert_eq!(id, "AA:BB:CC");
    assert_eq!(thingy.device_id().as_deref(), Some("AA:BB:CC"));

    // Exactly one white LED and one default beep, after the scan resolved.
    let leds = bridge.calls_of(commands::SET_LED);
    assert_eq!(leds.len(), 1);
    assert_eq!(leds[0].args, vec![json!(255), json!(255), json!(255)]);
    assert_eq!(bridge.calls_of(commands::BEEP).len(), 1);

    assert_eq!(
        bridge.sent_scripts(),
        vec![commands::SCAN, commands::SET_LED, commands::BEEP]
    );
}

#[tokio::test]
async fn scan_failure_carries_browser_reason_verbatim() {
    let (bridge, thingy) = attached_bridge().await;
    bridge.reject_scan_with("no device found");

    let err = thingy.scan().await.unwrap_err();

    assert!(matches!(err, Error::ScanFailed { .. }));
    assert!(err.to_string().contains("no device found"));

    // The failed attempt leaves no pairing and no confirmation commands.
    assert_eq!(thingy.device_id(), None);
    assert!(bridge.calls_of(commands::SET_LED).is_empty());
    assert!(bridge.calls_of(commands::BEEP).is_empty());
}

#[tokio::test]
async fn driver_load_failure_aborts_attach() {
    let bridge = Arc::new(MockBridge::new());
    bridge.fail_driver_load("page navigated away");

    let err = Thingy52::attach(bridge).await.unwrap_err();
    assert!(matches!(err, Error::DriverLoad { .. }));
    assert!(err.to_string().contains("page navigated away"));
}

// --- Commands ---

#[tokio::test]
async fn set_led_forwards_out_of_range_channels_unmodified() {
    let (bridge, thingy) = attached_bridge().await;

    thingy.set_led(300, -5, 128);

    let calls = bridge.calls_of(commands::SET_LED);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec![json!(300), json!(-5), json!(128)]);
}

#[tokio::test]
async fn commands_before_scan_are_forwarded_unconditionally() {
    let (bridge, thingy) = attached_bridge().await;

    // No pairing yet; the facade still hands everything to the bridge.
    thingy.set_led_off();
    thingy.beep_with(4000, 150, 50);

    assert_eq!(
        bridge.sent_scripts(),
        vec![commands::SET_LED_OFF, commands::BEEP_WITH]
    );
    let beeps = bridge.calls_of(commands::BEEP_WITH);
    assert_eq!(beeps[0].args, vec![json!(4000), json!(150), json!(50)]);
}

#[tokio::test]
async fn palette_commands_send_wire_codes() {
    use thingy52_core::Color;

    let (bridge, thingy) = attached_bridge().await;

    thingy.set_led_breathe(Color::Blue, 100, 1000);
    thingy.set_led_flash_once(Color::White, 80);

    let breathe = bridge.calls_of(commands::SET_LED_BREATHE);
    assert_eq!(breathe[0].args, vec![json!(4), json!(100), json!(1000)]);
    let flash = bridge.calls_of(commands::SET_LED_FLASH_ONCE);
    assert_eq!(flash[0].args, vec![json!(7), json!(80)]);
}

// --- Events ---

#[tokio::test]
async fn battery_payload_reaches_every_listener_in_registration_order() {
    let (_bridge, thingy) = attached_bridge().await;
    let seen: Arc<Mutex<Vec<(&str, u8)>>> = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&seen);
    let _a = thingy.add_battery_change_listener(move |e| first.lock().unwrap().push(("a", e.level)));
    let second = Arc::clone(&seen);
    let _b = thingy.add_battery_change_listener(move |e| second.lock().unwrap().push(("b", e.level)));

    thingy
        .proxy()
        .deliver("battery", &json!({ "batteryLevel": 42 }))
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![("a", 42), ("b", 42)]);
    assert_eq!(thingy.battery_level(), 42);
}

#[tokio::test]
async fn accelerometer_payload_decodes_field_for_field() {
    let (_bridge, thingy) = attached_bridge().await;
    let seen = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&seen);
    let _reg = thingy.add_accelerometer_listener(move |e| *slot.lock().unwrap() = Some(*e));

    thingy
        .proxy()
        .deliver("accelerometer", &json!({ "x": 1.0, "y": -2.5, "z": 0.0 }))
        .unwrap();

    let event = seen.lock().unwrap().expect("listener should have fired");
    assert!((event.x - 1.0).abs() < f64::EPSILON);
    assert!((event.y - -2.5).abs() < f64::EPSILON);
    assert!((event.z - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn removed_listener_stops_firing_while_others_continue() {
    let (_bridge, thingy) = attached_bridge().await;
    let seen: Arc<Mutex<Vec<&str>>> = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&seen);
    let a = thingy.add_button_listener(move |_| first.lock().unwrap().push("a"));
    let second = Arc::clone(&seen);
    let _b = thingy.add_button_listener(move |_| second.lock().unwrap().push("b"));

    a.remove();

    thingy
        .proxy()
        .deliver("button", &json!({ "pressed": true }))
        .unwrap();
    thingy
        .proxy()
        .deliver("button", &json!({ "pressed": false }))
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["b", "b"]);
    assert!(!thingy.button_pressed());
}

#[tokio::test]
async fn button_events_update_cached_state() {
    let (_bridge, thingy) = attached_bridge().await;

    thingy
        .proxy()
        .deliver("button", &json!({ "pressed": true }))
        .unwrap();
    assert!(thingy.button_pressed());

    thingy
        .proxy()
        .deliver("temperature", &json!({ "temperature": 24.5 }))
        .unwrap();
    // Temperature delivery must not disturb the button cache.
    assert!(thingy.button_pressed());
}

// --- Lifecycle ---

#[tokio::test]
async fn drop_requests_disconnect_when_still_paired() {
    let (bridge, thingy) = attached_bridge().await;
    bridge.resolve_scan_with("AA:BB:CC");
    thingy.scan().await.unwrap();

    drop(thingy);

    assert_eq!(bridge.calls_of(commands::DISCONNECT).len(), 1);
}

#[tokio::test]
async fn explicit_disconnect_is_not_repeated_on_drop() {
    let (bridge, thingy) = attached_bridge().await;
    bridge.resolve_scan_with("AA:BB:CC");
    thingy.scan().await.unwrap();

    thingy.disconnect();
    drop(thingy);

    assert_eq!(bridge.calls_of(commands::DISCONNECT).len(), 1);
}

#[tokio::test]
async fn drop_without_pairing_sends_nothing() {
    let (bridge, thingy) = attached_bridge().await;
    drop(thingy);
    assert!(bridge.sent_calls().is_empty());
}

// --- Forwarding properties ---

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn attach_blocking() -> (tokio::runtime::Runtime, Arc<MockBridge>, Thingy52) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime");
        let bridge = Arc::new(MockBridge::new());
        let thingy = rt
            .block_on(Thingy52::attach(bridge.clone()))
            .expect("attach");
        bridge.clear();
        (rt, bridge, thingy)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn set_led_forwards_any_i32_triple_verbatim(r in any::<i32>(), g in any::<i32>(), b in any::<i32>()) {
            let (_rt, bridge, thingy) = attach_blocking();
            thingy.set_led(r, g, b);
            let calls = bridge.calls_of(commands::SET_LED);
            prop_assert_eq!(&calls[0].args, &vec![json!(r), json!(g), json!(b)]);
        }

        #[test]
        fn beep_with_forwards_any_i32_triple_verbatim(f in any::<i32>(), d in any::<i32>(), v in any::<i32>()) {
            let (_rt, bridge, thingy) = attach_blocking();
            thingy.beep_with(f, d, v);
            let calls = bridge.calls_of(commands::BEEP_WITH);
            prop_assert_eq!(&calls[0].args, &vec![json!(f), json!(d), json!(v)]);
        }
    }
}

//! Example: Watching Sensor Events
//!
//! Demonstrates listener registration and the proxy's callback surface.
//! The driver callbacks are simulated by delivering payloads straight to
//! the proxy, exactly the way a host integration routes browser calls.
//!
//! Run with: `cargo run --example watch_sensors`

use std::sync::Arc;

use serde_json::json;
use thingy52_core::{MockBridge, Thingy52};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let bridge = Arc::new(MockBridge::new());
    let thingy = Thingy52::attach(bridge).await?;

    let _battery = thingy.add_battery_change_listener(|e| {
        println!("battery   {}%", e.level);
    });
    let _button = thingy.add_button_listener(|e| {
        println!("button    {}", if e.pressed { "pressed" } else { "released" });
    });
    let _temp = thingy.add_temperature_listener(|e| {
        println!("thermo    {:.2} °C", e.celsius);
    });
    let accel = thingy.add_accelerometer_listener(|e| {
        println!("accel     x={:+.2} y={:+.2} z={:+.2}", e.x, e.y, e.z);
    });

    // What a connected driver would deliver over a few seconds.
    let proxy = thingy.proxy();
    proxy.deliver("battery", &json!({ "batteryLevel": 93 }))?;
    proxy.deliver("temperature", &json!({ "temperature": 23.25 }))?;
    proxy.deliver("accelerometer", &json!({ "x": 0.02, "y": -0.01, "z": 0.98 }))?;
    proxy.deliver("button", &json!({ "pressed": true }))?;
    proxy.deliver("button", &json!({ "pressed": false }))?;

    // Unsubscribe the accelerometer; further samples go unseen.
    accel.remove();
    proxy.deliver("accelerometer", &json!({ "x": 1.5, "y": 0.0, "z": 0.2 }))?;

    println!();
    println!(
        "cached state: battery {}%, button pressed: {}",
        thingy.battery_level(),
        thingy.button_pressed()
    );

    Ok(())
}

//! Example: Pair and Blink
//!
//! Demonstrates the command surface of the facade: scan, LED control and
//! the beeper. A MockBridge stands in for the hosting page so the example
//! runs anywhere; a real host would supply its own ScriptBridge.
//!
//! Run with: `cargo run --example scan_and_blink`

use std::sync::Arc;

use thingy52_core::{Color, MockBridge, Thingy52};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let bridge = Arc::new(MockBridge::new());
    bridge.resolve_scan_with("AA:BB:CC");

    let thingy = Thingy52::attach(bridge.clone()).await?;

    println!("Scanning for a Thingy:52...");
    let device_id = thingy.scan().await?;
    println!("Paired with {device_id}");
    println!();

    // Walk the LED surface with a random palette color.
    let color = Color::random();
    println!("Breathing {color} for a second, then one flash...");
    thingy.set_led_breathe(color, 100, 1000);
    thingy.set_led_flash_once(Color::random(), 100);
    thingy.set_led_off();

    println!("And a victory beep.");
    thingy.beep_with(4000, 150, 60);

    println!();
    println!("Script calls the page would have executed:");
    for call in bridge.sent_calls() {
        if call.script.len() < 80 {
            println!("  {}  {:?}", call.script, call.args);
        }
    }

    thingy.disconnect();
    Ok(())
}

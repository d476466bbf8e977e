//! Mock bridge implementation for testing.
//!
//! This module provides a bridge that records script traffic instead of
//! driving a real page, so facade behavior can be unit tested without a
//! browser.
//!
//! # Features
//!
//! - **Scriptable scan outcome**: resolve with a chosen identifier or
//!   reject with a chosen reason
//! - **Load failure injection**: make driver injection fail to exercise
//!   the construction error path
//! - **Latency simulation**: add artificial delays to awaited calls

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::bridge::{ScriptBridge, ScriptCall};
use crate::commands;
use crate::error::{Error, Result};
use crate::util::lock;

enum ScanOutcome {
    Resolve(String),
    Reject(String),
}

/// A bridge that records script calls instead of executing them.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use thingy52_core::{MockBridge, Thingy52};
///
/// #[tokio::main]
/// async fn main() {
///     let bridge = Arc::new(MockBridge::new());
///     bridge.resolve_scan_with("AA:BB:CC");
///
///     let thingy = Thingy52::attach(bridge.clone()).await.unwrap();
///     let id = thingy.scan().await.unwrap();
///     assert_eq!(id, "AA:BB:CC");
/// }
/// ```
pub struct MockBridge {
    calls: Mutex<Vec<ScriptCall>>,
    scan_outcome: Mutex<ScanOutcome>,
    load_failure: Mutex<Option<String>>,
    call_latency_ms: AtomicU64,
}

impl MockBridge {
    /// Create a mock bridge that resolves scans with a generated identifier.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            scan_outcome: Mutex::new(ScanOutcome::Resolve(format!(
                "MOCK-{:06X}",
                rand::random::<u32>() & 0xFF_FFFF
            ))),
            load_failure: Mutex::new(None),
            call_latency_ms: AtomicU64::new(0),
        }
    }

    /// Make subsequent scans resolve with `id`.
    pub fn resolve_scan_with(&self, id: impl Into<String>) {
        *lock(&self.scan_outcome) = ScanOutcome::Resolve(id.into());
    }

    /// Make subsequent scans reject with `reason`.
    pub fn reject_scan_with(&self, reason: impl Into<String>) {
        *lock(&self.scan_outcome) = ScanOutcome::Reject(reason.into());
    }

    /// Make driver injection fail with `reason`.
    pub fn fail_driver_load(&self, reason: impl Into<String>) {
        *lock(&self.load_failure) = Some(reason.into());
    }

    /// Delay every awaited call by `latency`.
    pub fn set_call_latency(&self, latency: Duration) {
        self.call_latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Every call the facade has issued, in order.
    pub fn sent_calls(&self) -> Vec<ScriptCall> {
        lock(&self.calls).clone()
    }

    /// The script snippets issued so far, in order.
    pub fn sent_scripts(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|c| c.script.clone()).collect()
    }

    /// The calls issued for one snippet, in order.
    pub fn calls_of(&self, script: &str) -> Vec<ScriptCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.script == script)
            .cloned()
            .collect()
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBridge")
            .field("recorded_calls", &lock(&self.calls).len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ScriptBridge for MockBridge {
    fn send(&self, call: ScriptCall) {
        lock(&self.calls).push(call);
    }

    async fn call(&self, call: ScriptCall) -> Result<Value> {
        let latency = self.call_latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        let is_scan = call.script == commands::SCAN;
        lock(&self.calls).push(call);

        if is_scan {
            match &*lock(&self.scan_outcome) {
                ScanOutcome::Resolve(id) => Ok(json!(id)),
                ScanOutcome::Reject(reason) => Err(Error::ScriptRejected {
                    reason: reason.clone(),
                }),
            }
        } else if let Some(reason) = lock(&self.load_failure).clone() {
            Err(Error::ScriptRejected { reason })
        } else {
            Ok(Value::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::ProxyId;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let bridge = MockBridge::new();
        let target = ProxyId::generate();

        bridge.send(ScriptCall::new("$0.a()", target.clone()));
        bridge
            .call(ScriptCall::new("$0.b()", target))
            .await
            .unwrap();

        assert_eq!(bridge.sent_scripts(), vec!["$0.a()", "$0.b()"]);
    }

    #[tokio::test]
    async fn test_latency_is_applied_before_resolution() {
        let bridge = MockBridge::new();
        bridge.set_call_latency(Duration::from_millis(20));

        let start = std::time::Instant::now();
        bridge
            .call(ScriptCall::new(commands::SCAN, ProxyId::generate()))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_scan_rejection() {
        let bridge = MockBridge::new();
        bridge.reject_scan_with("adapter off");

        let err = bridge
            .call(ScriptCall::new(commands::SCAN, ProxyId::generate()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ScriptRejected { .. }));
    }
}

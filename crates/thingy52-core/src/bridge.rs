//! The seam between the facade and the hosting page.
//!
//! This module defines the [`ScriptBridge`] trait that abstracts over
//! real page bridges (owned by the hosting UI integration) and the
//! [`crate::MockBridge`] used in tests.
//!
//! A script call has two delivery shapes:
//!
//! - [`ScriptBridge::send`] — fire-and-forget; by contract there is no
//!   failure channel, so browser-side errors are invisible to the caller.
//! - [`ScriptBridge::call`] — awaits the value the browser resolves with;
//!   used only where a result is part of the contract (scan, driver load).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Opaque handle identifying a [`crate::BridgeProxy`] to the hosting page.
///
/// Host bridges resolve this to the DOM-side element backing the proxy
/// when substituting the `$0` placeholder of a script call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyId(String);

impl ProxyId {
    pub(crate) fn generate() -> Self {
        ProxyId(format!(
            "thingy52-proxy-{:06x}",
            rand::random::<u32>() & 0xFF_FFFF
        ))
    }

    /// The handle as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProxyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One script invocation against the hosting page.
///
/// `script` uses positional placeholders: `$0` is always the proxy target
/// and `$1..$n` are `args` in order. Arguments are passed uninterpreted —
/// range checking is the caller's responsibility, matching the driver
/// contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptCall {
    /// The snippet to execute.
    pub script: String,
    /// The proxy bound as `$0`.
    pub target: ProxyId,
    /// Positional arguments bound as `$1..`.
    pub args: Vec<Value>,
}

impl ScriptCall {
    /// Build a call with no positional arguments.
    pub fn new(script: impl Into<String>, target: ProxyId) -> Self {
        Self {
            script: script.into(),
            target,
            args: Vec::new(),
        }
    }

    /// Build a call with positional arguments.
    pub fn with_args(script: impl Into<String>, target: ProxyId, args: Vec<Value>) -> Self {
        Self {
            script: script.into(),
            target,
            args,
        }
    }
}

/// Executes script calls against the hosting page.
///
/// Implemented by the UI integration that owns the session's page; the
/// facade never knows how calls actually reach the browser. One bridge
/// per session — the facade/proxy pair bound to it must not be shared
/// across sessions.
#[async_trait]
pub trait ScriptBridge: Send + Sync {
    /// Queue a call without a result channel.
    ///
    /// Browser-side failures are not observable through this path.
    fn send(&self, call: ScriptCall);

    /// Execute a call and await the value the browser resolves with.
    ///
    /// A rejection surfaces as [`crate::Error::ScriptRejected`] carrying
    /// the browser-reported reason.
    async fn call(&self, call: ScriptCall) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_proxy_ids_are_unique() {
        let a = ProxyId::generate();
        let b = ProxyId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("thingy52-proxy-"));
    }

    #[test]
    fn test_script_call_construction() {
        let target = ProxyId::generate();
        let call = ScriptCall::with_args("$0.f($1)", target.clone(), vec![json!(7)]);
        assert_eq!(call.script, "$0.f($1)");
        assert_eq!(call.target, target);
        assert_eq!(call.args, vec![json!(7)]);

        let bare = ScriptCall::new("$0.g()", target);
        assert!(bare.args.is_empty());
    }
}

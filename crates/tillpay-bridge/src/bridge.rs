//! # Native Bridge Boundary
//!
//! The single invocation primitive through which everything reaches the
//! native payment SDK, plus the adapter that turns its callback style into
//! futures.
//!
//! ## Invocation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bridge Invocation Flow                             │
//! │                                                                         │
//! │  1. Session builds an Invocation (plugin, operation, positional args)  │
//! │  2. call() creates a oneshot channel and hands the bridge a            │
//! │     completion callback wrapping the sender                            │
//! │  3. The native side runs the operation and fires the callback          │
//! │     exactly once with success payload or raw failure value             │
//! │  4. call() awaits the receiver:                                        │
//! │       Ok(Ok(payload))  → Ok(payload)                                   │
//! │       Ok(Err(raw))     → Err(Bridge(BridgeError::from_raw))            │
//! │       Err(_)           → Err(BridgeGone)  (callback dropped unfired)   │
//! │                                                                         │
//! │  One invocation, one resolution. No events, no streaming.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{SessionError, SessionResult};
use tillpay_core::BridgeError;

// =============================================================================
// Plugin Identifier
// =============================================================================

/// Fixed plugin identifier carried by every invocation.
///
/// The native side uses this to route the call to the payment plugin; it is
/// constant for the lifetime of the SDK.
pub const PLUGIN_NAME: &str = "TillPay";

// =============================================================================
// Operations
// =============================================================================

/// The closed set of operations the native payment plugin understands.
///
/// Wire names are part of the bridge contract and never change; `Display`
/// renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Run a card checkout.
    Pay,
    /// Hint that a checkout is imminent (wake the terminal).
    PreparePay,
    /// Log the merchant in with an OAuth access token.
    LoginWithToken,
    /// Present the native merchant login screen.
    Login,
    /// Log the current merchant out.
    Logout,
    /// Ask the native side whether a merchant login is active.
    IsLoggedIn,
    /// Open the native checkout preferences screen.
    Settings,
}

impl Operation {
    /// Returns the operation name as it crosses the bridge.
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Operation::Pay => "pay",
            Operation::PreparePay => "preparePay",
            Operation::LoginWithToken => "loginWithToken",
            Operation::Login => "login",
            Operation::Logout => "logout",
            Operation::IsLoggedIn => "isLoggedIn",
            Operation::Settings => "settings",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

// =============================================================================
// Invocation
// =============================================================================

/// One call across the native boundary.
///
/// Arguments are positional and operation-specific; absent optional
/// arguments cross as JSON null so positions stay stable.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Plugin identifier, always [`PLUGIN_NAME`].
    pub plugin: &'static str,

    /// Operation to run.
    pub operation: Operation,

    /// Positional arguments.
    pub args: Vec<Value>,
}

impl Invocation {
    /// Builds an invocation for the fixed plugin.
    pub fn new(operation: Operation, args: Vec<Value>) -> Self {
        Invocation {
            plugin: PLUGIN_NAME,
            operation,
            args,
        }
    }
}

// =============================================================================
// Native Bridge Trait
// =============================================================================

/// Outcome delivered by the native side: success payload or raw failure
/// value, both implementation-defined JSON.
pub type InvocationOutcome = Result<Value, Value>;

/// Completion callback handed to the bridge; fired exactly once.
pub type CompletionCallback = Box<dyn FnOnce(InvocationOutcome) + Send + 'static>;

/// The opaque native invocation channel.
///
/// Implementations are supplied by the host application (the actual
/// platform SDK glue) and must deliver exactly one outcome per invocation.
/// The trait is callback-style on purpose: it mirrors the native call
/// convention, and [`call`] owns the adaptation into futures.
pub trait NativeBridge: Send + Sync {
    /// Runs one operation; `complete` must be fired exactly once.
    fn invoke(&self, invocation: Invocation, complete: CompletionCallback);
}

// =============================================================================
// Callback → Future Adapter
// =============================================================================

/// Wraps exactly one bridge invocation into a future that resolves exactly
/// once.
///
/// Failures are normalized uniformly: the raw failure value becomes a
/// [`BridgeError`] with its embedded code extracted. A bridge that drops
/// the callback without firing it yields [`SessionError::BridgeGone`].
pub(crate) async fn call(
    bridge: &dyn NativeBridge,
    operation: Operation,
    args: Vec<Value>,
) -> SessionResult<Value> {
    let (tx, rx) = oneshot::channel();

    debug!(%operation, "invoking native bridge");
    bridge.invoke(
        Invocation::new(operation, args),
        Box::new(move |outcome| {
            // Receiver may be gone if the caller was dropped mid-await
            let _ = tx.send(outcome);
        }),
    );

    match rx.await {
        Ok(Ok(payload)) => Ok(payload),
        Ok(Err(raw)) => {
            let err = BridgeError::from_raw(&raw);
            debug!(%operation, code = ?err.code, "native bridge reported failure");
            Err(SessionError::Bridge(err))
        }
        Err(_) => Err(SessionError::BridgeGone),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

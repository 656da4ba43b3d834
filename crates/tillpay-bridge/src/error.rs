//! # Session Error Types
//!
//! Error types for session operations.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Bridge         │  │   Logical       │  │     Adapter             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Bridge(err)    │  │  NotLoggedIn    │  │  BridgeGone             │ │
//! │  │  raw failure +  │  │  Validation     │  │  callback dropped       │ │
//! │  │  optional code  │  │  local checks   │  │  without firing         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Recognized bridge codes:                                              │
//! │  • 22  - merchant already logged in (benign, becomes a resume)         │
//! │  • 205 - checkout session invalidated (forces a logout)                │
//! │  Everything else is opaque and surfaced unchanged                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tillpay_core::{BridgeError, ValidationError, CODE_ALREADY_LOGGED_IN, CODE_CHECKOUT_SESSION_INVALID};

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session error type covering all facade failures.
///
/// ## Design Principles
/// - No automatic retries: every failure is surfaced to the caller
/// - All errors are `Send + Sync` for async compatibility
/// - Nothing here is fatal; every failure is recoverable at the call site
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failure delivered by the native bridge, normalized.
    #[error("{0}")]
    Bridge(#[from] BridgeError),

    /// The native check reported no active merchant login.
    ///
    /// Synthesized locally: the underlying call *succeeds* with `false`,
    /// and the facade inverts that into this error so callers branch on
    /// the rejection rather than on a falsy resolution.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Request rejected before crossing the bridge.
    #[error("invalid transaction request: {0}")]
    Validation(#[from] ValidationError),

    /// The bridge dropped the completion callback without firing it.
    #[error("native bridge dropped the invocation without completing it")]
    BridgeGone,
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SessionError {
    /// Returns the numeric code carried by a bridge failure, if any.
    pub fn code(&self) -> Option<u32> {
        match self {
            SessionError::Bridge(err) => err.code,
            _ => None,
        }
    }

    /// Returns true for the "merchant already logged in" failure, which a
    /// token login treats as a successful resume.
    pub fn is_already_logged_in(&self) -> bool {
        self.code() == Some(CODE_ALREADY_LOGGED_IN)
    }

    /// Returns true when the checkout session was invalidated mid-payment;
    /// the facade reacts by forcing a logout.
    pub fn is_session_invalidating(&self) -> bool {
        self.code() == Some(CODE_CHECKOUT_SESSION_INVALID)
    }
}

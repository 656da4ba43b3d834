//! # tillpay-bridge: Native Bridge + Session Facade for TillPay
//!
//! This crate provides the async layer of TillPay: the single invocation
//! boundary to the native payment terminal SDK and the session facade that
//! owns login bookkeeping on top of it.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Facade Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     Session (Main Facade)                        │  │
//! │  │                                                                  │  │
//! │  │  One per application, injected into callers                     │  │
//! │  │  Owns: logged-in flag, expiry timer handle                      │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ call() adapter │  │  NativeBridge  │  │  Expiry task           │    │
//! │  │                │  │                │  │                        │    │
//! │  │ One callback   │  │ Opaque trait,  │  │ Sleeps the token       │    │
//! │  │ pair wrapped   │  │ host-supplied, │  │ lifetime, then drives  │    │
//! │  │ into a future  │  │ one outcome    │  │ logout()               │    │
//! │  │ via oneshot    │  │ per invocation │  │                        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`bridge`] - `NativeBridge` trait, `Invocation`, `Operation`, adapter
//! - [`config`] - Session configuration (token lifetime)
//! - [`error`] - `SessionError` and recognized-code helpers
//! - [`session`] - The `Session` facade
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tillpay_bridge::{Session, SessionConfig};
//! use tillpay_core::{Amount, Currency, TransactionRequest};
//!
//! // The host supplies the platform bridge implementation
//! let session = Session::new(Arc::new(platform_bridge), SessionConfig::default());
//!
//! session.login_with_token(&token).await?;
//! let request = TransactionRequest::new(Amount::from_minor(1099), Currency::Eur, "Coffee");
//! let result = session.pay(&request).await?;
//! println!("txcode: {:?}", result.txcode);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bridge;
pub mod config;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use bridge::{CompletionCallback, Invocation, InvocationOutcome, NativeBridge, Operation, PLUGIN_NAME};
pub use config::{SessionConfig, DEFAULT_TOKEN_LIFETIME_SECS, TOKEN_LIFETIME_ENV};
pub use error::{SessionError, SessionResult};
pub use session::Session;

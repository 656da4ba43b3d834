//! # tillpay-core: Pure Logic for TillPay
//!
//! This crate is the I/O-free half of TillPay. Everything that can be
//! expressed as a pure function over values lives here; the async native
//! bridge and the session facade live in `tillpay-bridge` on top.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TillPay Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Host application (out of scope)                │   │
//! │  │        supplies a NativeBridge impl, drives the Session         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   tillpay-bridge (async)                        │   │
//! │  │     Session facade, NativeBridge trait, expiry timer            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tillpay-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  amount   │  │   types   │  │   error   │  │ validation│  │   │
//! │  │   │  Amount   │  │ Currency  │  │ code parse│  │   rules   │  │   │
//! │  │   │           │  │ Request   │  │BridgeError│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO BRIDGE CALLS • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`amount`] - Monetary amounts in integer minor units (no floating point!)
//! - [`types`] - Currency codes, transaction requests, native result DTOs
//! - [`error`] - Error-code extraction and typed errors
//! - [`validation`] - Request validation before a checkout crosses the bridge
//!
//! ## Example Usage
//!
//! ```rust
//! use tillpay_core::{Amount, Currency, TransactionRequest};
//!
//! // Amounts are minor units (never floats!)
//! let amount = Amount::from_minor(1099); // 10.99
//! assert_eq!(amount.to_string(), "10.99");
//!
//! let request = TransactionRequest::new(amount, Currency::Eur, "Coffee")
//!     .skip_success_screen(true);
//! assert!(request.skip_success_screen);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tillpay_core::Amount` instead of
// `use tillpay_core::amount::Amount`

pub use amount::Amount;
pub use error::{parse_error_code, BridgeError, ValidationError};
pub use types::{Currency, LoginOutcome, MerchantInfo, TransactionRequest, TransactionResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Error code the native side reports when a merchant is already logged in.
///
/// ## Why recognized?
/// Logging in with a token while a native session is still alive is benign:
/// the session facade treats this failure as a successful resume instead of
/// surfacing it to the caller.
pub const CODE_ALREADY_LOGGED_IN: u32 = 22;

/// Error code the native side reports when the checkout session has been
/// invalidated (typically an expired token discovered mid-payment).
///
/// ## Why recognized?
/// The session facade reacts by forcing a logout so the next attempt starts
/// from a clean login; the original failure still reaches the caller.
pub const CODE_CHECKOUT_SESSION_INVALID: u32 = 205;

//! # Validation Module
//!
//! Request validation before a checkout crosses the bridge.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Types (Rust)                                                 │
//! │  ├── Currency is a closed enum (unknown codes never construct)         │
//! │  └── Amount is integer minor units (no float drift)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Value checks the types cannot express (amount > 0)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Native SDK (out of scope)                                    │
//! │  └── Re-validates everything, rejects with opaque free-text errors     │
//! │                                                                         │
//! │  Failing locally gives the caller a typed error instead of a           │
//! │  round-trip through the bridge                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::TransactionRequest;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a checkout request.
///
/// ## Rules
/// - Amount must be strictly positive
///
/// ## Example
/// ```rust
/// use tillpay_core::amount::Amount;
/// use tillpay_core::types::{Currency, TransactionRequest};
/// use tillpay_core::validation::validate_request;
///
/// let ok = TransactionRequest::new(Amount::from_minor(100), Currency::Eur, "Coffee");
/// assert!(validate_request(&ok).is_ok());
///
/// let zero = TransactionRequest::new(Amount::zero(), Currency::Eur, "Coffee");
/// assert!(validate_request(&zero).is_err());
/// ```
pub fn validate_request(request: &TransactionRequest) -> ValidationResult<()> {
    if !request.amount.is_positive() {
        return Err(ValidationError::AmountNotPositive {
            amount: request.amount.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

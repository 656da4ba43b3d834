//! # Error Types
//!
//! Error-code extraction and typed errors for tillpay-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tillpay-core errors (this file)                                       │
//! │  ├── BridgeError      - Normalized native bridge failure               │
//! │  └── ValidationError  - Request validation failures                    │
//! │                                                                         │
//! │  tillpay-bridge errors (separate crate)                                │
//! │  └── SessionError     - What the session facade surfaces               │
//! │                                                                         │
//! │  Flow: raw failure value → BridgeError → SessionError → Caller         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Embedded Error Code
//!
//! The native side reports failures as free-text strings that may embed a
//! marker of the form `Error 0x00<class><code>: <message>`, where class is
//! 0 for login/general failures, 2 for payment failures and 3 for settings
//! failures. The decimal digit run after the zeros is the unified error
//! code, e.g. `"Error 0x00022: Merchant already logged in"` carries code 22
//! and `"Error 0x000000205: ..."` carries code 205.
//!
//! [`parse_error_code`] isolates that extraction; [`BridgeError`] attaches
//! the result to the normalized failure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// Error-Code Extraction
// =============================================================================

/// Marker pattern for the embedded numeric code: `Error 0x`, at least two
/// zeros, then a digit run starting with a non-zero digit and at least two
/// digits long.
static ERROR_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Error 0x00+([1-9][0-9]+)").expect("ERROR_CODE_RE should compile"));

/// Extracts the numeric error code embedded in a native failure string.
///
/// Returns `None` when the string carries no recognizable marker. The digit
/// run is parsed as decimal, so `"Error 0x000000205"` yields `Some(205)`.
///
/// ## Example
/// ```rust
/// use tillpay_core::error::parse_error_code;
///
/// assert_eq!(parse_error_code("Error 0x00022: already logged in"), Some(22));
/// assert_eq!(parse_error_code("connection lost"), None);
/// ```
pub fn parse_error_code(message: &str) -> Option<u32> {
    ERROR_CODE_RE
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
}

// =============================================================================
// Bridge Error
// =============================================================================

/// A failure delivered by the native bridge, normalized.
///
/// The raw failure value is implementation-defined; this type captures its
/// string form plus the extracted numeric code when one is embedded. Built
/// once from the raw value and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BridgeError {
    /// String form of the raw failure value.
    pub message: String,

    /// Numeric code extracted from the message, when present.
    pub code: Option<u32>,
}

impl BridgeError {
    /// Normalizes a raw failure value from the bridge.
    ///
    /// JSON strings are taken verbatim (unquoted); any other value is
    /// rendered through its JSON text form.
    pub fn from_raw(raw: &Value) -> Self {
        let message = match raw {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let code = parse_error_code(&message);
        BridgeError { message, code }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Request validation errors.
///
/// These occur before anything crosses the bridge; the native side would
/// reject the same inputs, but with an opaque free-text failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Checkout amount must be strictly positive.
    #[error("amount must be positive, got {amount}")]
    AmountNotPositive { amount: String },

    /// Currency code is not one the terminal SDK accepts.
    #[error("unknown currency code '{code}'")]
    UnknownCurrency { code: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!(
            parse_error_code("Error 0x00022: Merchant already logged in"),
            Some(22)
        );
        assert_eq!(parse_error_code("Error 0x00205: invalid token"), Some(205));
        assert_eq!(parse_error_code("Error 0x000000205"), Some(205));
    }

    #[test]
    fn test_parse_marker_anywhere_in_message() {
        assert_eq!(
            parse_error_code("checkout failed: Error 0x00205: invalid token"),
            Some(205)
        );
    }

    #[test]
    fn test_parse_malformed_inputs() {
        // No marker at all
        assert_eq!(parse_error_code("connection lost"), None);
        assert_eq!(parse_error_code(""), None);

        // Too few zeros after 0x
        assert_eq!(parse_error_code("Error 0x05"), None);

        // Single-digit code runs are not codes
        assert_eq!(parse_error_code("Error 0x00005"), None);

        // Zeros only
        assert_eq!(parse_error_code("Error 0x00000"), None);

        // Code must start with a non-zero digit right after the zeros
        assert_eq!(parse_error_code("Error 0xff022"), None);

        // Case matters, as in the original contract
        assert_eq!(parse_error_code("error 0x00022"), None);
    }

    #[test]
    fn test_from_raw_string_is_unquoted() {
        let err = BridgeError::from_raw(&json!("Error 0x00022: already logged in"));
        assert_eq!(err.message, "Error 0x00022: already logged in");
        assert_eq!(err.code, Some(22));
    }

    #[test]
    fn test_from_raw_non_string_values() {
        let err = BridgeError::from_raw(&json!({"reason": "declined"}));
        assert_eq!(err.message, r#"{"reason":"declined"}"#);
        assert_eq!(err.code, None);

        let err = BridgeError::from_raw(&Value::Null);
        assert_eq!(err.message, "null");
        assert_eq!(err.code, None);
    }

    #[test]
    fn test_display_is_message() {
        let err = BridgeError::from_raw(&json!("Error 0x00205: invalid token"));
        assert_eq!(err.to_string(), "Error 0x00205: invalid token");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::AmountNotPositive {
            amount: "0.00".to_string(),
        };
        assert_eq!(err.to_string(), "amount must be positive, got 0.00");

        let err = ValidationError::UnknownCurrency {
            code: "XXX".to_string(),
        };
        assert_eq!(err.to_string(), "unknown currency code 'XXX'");
    }
}

//! # Amount Module
//!
//! Provides the `Amount` type for handling monetary values safely.
//!
//! ## Why Integer Amounts?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The native terminal SDK expects the amount as a decimal STRING.        │
//! │  Formatting a float loses control over that string.                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    1099 minor units → "10.99", exactly, every time                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tillpay_core::amount::Amount;
//!
//! // Create from minor units (preferred)
//! let price = Amount::from_minor(1099); // 10.99
//!
//! // The Display form is what crosses the native bridge
//! assert_eq!(price.to_string(), "10.99");
//!
//! // NEVER do this:
//! // let bad = Amount::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Amount Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for EUR/USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: refunds are negative; validation rejects them for
///   checkouts, but the type itself stays general
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// The `Display` form (`"10.99"`) is the exact string handed to the native
/// bridge, which parses it as a decimal on the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    /// Creates an Amount from minor units (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tillpay_core::amount::Amount;
    ///
    /// let price = Amount::from_minor(1099); // Represents 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Amount(minor)
    }

    /// Creates an Amount from major and minor parts.
    ///
    /// ## Example
    /// ```rust
    /// use tillpay_core::amount::Amount;
    ///
    /// let price = Amount::from_major_minor(10, 99); // 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major part should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Amount(major * 100 - minor)
        } else {
            Amount(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major-unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use tillpay_core::amount::Amount;
    ///
    /// assert_eq!(Amount::from_minor(1099).major_part(), 10);
    /// assert_eq!(Amount::from_minor(-550).major_part(), -5);
    /// ```
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    ///
    /// Checkout validation requires this to hold.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the decimal wire form, e.g. `1099` → `"10.99"`.
///
/// This is not a debugging convenience: the native side parses exactly this
/// string, so the format is part of the bridge contract.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

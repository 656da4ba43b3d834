//! # Domain Types
//!
//! Core domain types used throughout TillPay.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌────────────────────┐   ┌─────────────────┐   ┌──────────────────┐   │
//! │  │ TransactionRequest │   │  MerchantInfo   │   │TransactionResult │   │
//! │  │  ────────────────  │   │  ─────────────  │   │  ──────────────  │   │
//! │  │  amount            │   │  merchant_code  │   │  txcode          │   │
//! │  │  currency          │   │  merchant_      │   │  amount          │   │
//! │  │  title             │   │    currency     │   │  status          │   │
//! │  │  optionals…        │   │                 │   │  payment_type    │   │
//! │  └────────────────────┘   └─────────────────┘   └──────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Currency     │   │  LoginOutcome   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Eur, Usd, Chf… │   │  Fresh(info)    │                             │
//! │  │  closed set     │   │  Resumed        │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests flow outward (typed → positional bridge args); results flow
//! inward (native JSON → tolerant DTOs, unknown fields ignored).

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::ValidationError;

// =============================================================================
// Currency
// =============================================================================

/// Currency codes the terminal SDK accepts for a checkout.
///
/// ## Why a closed set?
/// The native side validates the currency against its own enum and rejects
/// anything else with an opaque "Can't parse currency" failure. Modeling the
/// same set here turns that runtime failure into a typed, local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Bgn,
    Brl,
    Chf,
    Czk,
    Dkk,
    Eur,
    Gbp,
    Huf,
    Nok,
    Pln,
    Ron,
    Sek,
    Usd,
}

impl Currency {
    /// Returns the ISO 4217 code, which is also the wire form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Currency::Bgn => "BGN",
            Currency::Brl => "BRL",
            Currency::Chf => "CHF",
            Currency::Czk => "CZK",
            Currency::Dkk => "DKK",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Huf => "HUF",
            Currency::Nok => "NOK",
            Currency::Pln => "PLN",
            Currency::Ron => "RON",
            Currency::Sek => "SEK",
            Currency::Usd => "USD",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BGN" => Ok(Currency::Bgn),
            "BRL" => Ok(Currency::Brl),
            "CHF" => Ok(Currency::Chf),
            "CZK" => Ok(Currency::Czk),
            "DKK" => Ok(Currency::Dkk),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "HUF" => Ok(Currency::Huf),
            "NOK" => Ok(Currency::Nok),
            "PLN" => Ok(Currency::Pln),
            "RON" => Ok(Currency::Ron),
            "SEK" => Ok(Currency::Sek),
            "USD" => Ok(Currency::Usd),
            other => Err(ValidationError::UnknownCurrency {
                code: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Transaction Request
// =============================================================================

/// A checkout request, passed through to the native side.
///
/// Not persisted anywhere; it exists only for the duration of one `pay`
/// call. Amount and flag coercions (decimal string, 1/0) happen when the
/// request is marshalled into bridge arguments, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// The amount to charge.
    pub amount: Amount,

    /// Checkout currency.
    pub currency: Currency,

    /// Transaction title, shown in history and on receipts.
    pub title: String,

    /// Foreign transaction identifier for referencing (optional).
    pub foreign_transaction_id: Option<String>,

    /// Whether to skip the native payment success screen.
    pub skip_success_screen: bool,

    /// Customer e-mail address for sending a receipt to (optional).
    pub receipt_email: Option<String>,

    /// Customer mobile number for an SMS receipt (optional).
    pub receipt_phone: Option<String>,
}

impl TransactionRequest {
    /// Creates a request with the mandatory fields; optionals default off.
    pub fn new(amount: Amount, currency: Currency, title: impl Into<String>) -> Self {
        TransactionRequest {
            amount,
            currency,
            title: title.into(),
            foreign_transaction_id: None,
            skip_success_screen: false,
            receipt_email: None,
            receipt_phone: None,
        }
    }

    /// Sets the foreign transaction identifier.
    pub fn foreign_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.foreign_transaction_id = Some(id.into());
        self
    }

    /// Sets whether the native success screen is skipped.
    pub fn skip_success_screen(mut self, skip: bool) -> Self {
        self.skip_success_screen = skip;
        self
    }

    /// Sets the receipt e-mail address.
    pub fn receipt_email(mut self, email: impl Into<String>) -> Self {
        self.receipt_email = Some(email.into());
        self
    }

    /// Sets the receipt SMS number.
    pub fn receipt_phone(mut self, phone: impl Into<String>) -> Self {
        self.receipt_phone = Some(phone.into());
        self
    }
}

// =============================================================================
// Native Result Payloads
// =============================================================================

/// Merchant info composed by the native side on login success.
///
/// The wire object is `{code, message, merchantCode, merchantCurrency}`;
/// every field is optional because the payload shape is owned by the native
/// SDK and varies between platforms. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantInfo {
    /// Native result code (1 on success).
    #[serde(default)]
    pub code: Option<i64>,

    /// Native result message.
    #[serde(default)]
    pub message: Option<String>,

    /// Merchant account code.
    #[serde(default, rename = "merchantCode")]
    pub merchant_code: Option<String>,

    /// Currency the merchant account settles in.
    #[serde(default, rename = "merchantCurrency")]
    pub merchant_currency: Option<String>,
}

/// Transaction details composed by the native side on checkout success.
///
/// Wire keys are taken verbatim from the native result object (`txcode`,
/// `payment_type`, …); every field is optional for the same reason as
/// [`MerchantInfo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    /// Native result code (1 on success).
    #[serde(default)]
    pub code: Option<i64>,

    /// Native result message.
    #[serde(default)]
    pub message: Option<String>,

    /// Transaction code assigned by the payment backend.
    #[serde(default)]
    pub txcode: Option<String>,

    /// Charged amount as the native side reports it.
    #[serde(default)]
    pub amount: Option<f64>,

    /// Checkout currency as the native side reports it.
    #[serde(default)]
    pub currency: Option<String>,

    /// Transaction status (e.g. "SUCCESSFUL").
    #[serde(default)]
    pub status: Option<String>,

    /// Payment instrument used (e.g. "POS").
    #[serde(default)]
    pub payment_type: Option<String>,
}

// =============================================================================
// Login Outcome
// =============================================================================

/// Outcome of a token login.
///
/// The native side answers a token login against an already-live session
/// with a dedicated failure code; the facade translates that into
/// `Resumed` instead of surfacing the error. A `Resumed` outcome carries no
/// merchant info because no fresh login happened.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// A fresh native login completed.
    Fresh(MerchantInfo),

    /// The existing native session was kept.
    Resumed,
}

impl LoginOutcome {
    /// Returns true when the existing session was resumed.
    pub const fn is_resumed(&self) -> bool {
        matches!(self, LoginOutcome::Resumed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_currency_round_trip() {
        assert_eq!("EUR".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!("chf".parse::<Currency>().unwrap(), Currency::Chf);
        assert_eq!(Currency::Sek.to_string(), "SEK");

        let err = "XXX".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "unknown currency code 'XXX'");
    }

    #[test]
    fn test_currency_serde_uses_wire_code() {
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), "\"EUR\"");
        let back: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(back, Currency::Usd);
    }

    #[test]
    fn test_request_builder() {
        let request = TransactionRequest::new(Amount::from_minor(1000), Currency::Eur, "Coffee")
            .foreign_transaction_id("order-42")
            .skip_success_screen(true)
            .receipt_email("a@b.test");

        assert_eq!(request.title, "Coffee");
        assert_eq!(request.foreign_transaction_id.as_deref(), Some("order-42"));
        assert!(request.skip_success_screen);
        assert_eq!(request.receipt_email.as_deref(), Some("a@b.test"));
        assert_eq!(request.receipt_phone, None);
    }

    #[test]
    fn test_merchant_info_tolerates_unknown_shapes() {
        let info: MerchantInfo = serde_json::from_value(json!({
            "code": 1,
            "message": "ok",
            "merchantCode": "M123",
            "merchantCurrency": "EUR",
            "somethingNew": true
        }))
        .unwrap();
        assert_eq!(info.merchant_code.as_deref(), Some("M123"));
        assert_eq!(info.merchant_currency.as_deref(), Some("EUR"));

        // Entirely foreign payloads still deserialize, all fields absent
        let info: MerchantInfo = serde_json::from_value(json!({"merchant": "X"})).unwrap();
        assert_eq!(info, MerchantInfo::default());
    }

    #[test]
    fn test_transaction_result_wire_keys() {
        let result: TransactionResult = serde_json::from_value(json!({
            "code": 1,
            "message": "ok",
            "txcode": "TX9",
            "amount": 10.0,
            "currency": "EUR",
            "status": "SUCCESSFUL",
            "payment_type": "POS"
        }))
        .unwrap();
        assert_eq!(result.txcode.as_deref(), Some("TX9"));
        assert_eq!(result.payment_type.as_deref(), Some("POS"));
        assert_eq!(result.status.as_deref(), Some("SUCCESSFUL"));
    }

    #[test]
    fn test_login_outcome() {
        assert!(LoginOutcome::Resumed.is_resumed());
        assert!(!LoginOutcome::Fresh(MerchantInfo::default()).is_resumed());
    }
}

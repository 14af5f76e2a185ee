//! Delegated-payment model.
//!
//! The delegated-payment endpoint lives outside the session lifecycle and
//! authorizes a payment method on behalf of a cart. It has its own closed
//! vocabularies and its own error envelope, distinct from the session
//! endpoints where errors ride along as cart messages.

use std::collections::HashMap;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::model::{checkout::Address, enums::PaymentMethodType};

/// Rejects wire strings longer than `MAX` characters. Fails closed, like
/// the enum vocabularies.
fn bounded<'de, D: Deserializer<'de>, const MAX: usize>(
    deserializer: D,
) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    if value.chars().count() > MAX {
        return Err(de::Error::custom(format!(
            "value exceeds {MAX} characters: {value:?}"
        )));
    }
    Ok(value)
}

/// Optional-field variant of [`bounded`].
fn bounded_opt<'de, D: Deserializer<'de>, const MAX: usize>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    if let Some(s) = &value {
        if s.chars().count() > MAX {
            return Err(de::Error::custom(format!("value exceeds {MAX} characters: {s:?}")));
        }
    }
    Ok(value)
}

/// How the card number is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardNumberType {
    /// Funding primary account number.
    Fpan,
    /// Network-issued token.
    NetworkToken,
}

/// Card funding class for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCardType {
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
    /// Prepaid card.
    Prepaid,
}

/// Why the allowance was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceReason {
    /// Single-use authorization.
    OneTime,
}

/// Kind of risk signal attached to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignalType {
    /// Suspected card-testing activity.
    CardTesting,
}

/// Recommended handling for a risk signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAction {
    /// Decline outright.
    Blocked,
    /// Queue for manual review.
    ManualReview,
    /// Proceed.
    Authorized,
}

/// Error class in the delegated-payment error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegatedErrorType {
    /// Malformed or rejected request.
    InvalidRequest,
    /// Caller exceeded its rate limit.
    RateLimitExceeded,
    /// Downstream processing failure.
    ProcessingError,
    /// Endpoint temporarily unavailable.
    ServiceUnavailable,
}

/// Card details to delegate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Method kind.
    pub r#type: PaymentMethodType,
    /// Number representation.
    pub card_number_type: CardNumberType,
    /// Whether the card is virtual; the wire key is `virtual`.
    #[serde(rename = "virtual")]
    pub virtual_card: bool,
    /// Card number; the wire key is `number`.
    #[serde(rename = "number")]
    pub card_number: String,
    /// Expiry month, two digits at most.
    #[serde(
        default,
        deserialize_with = "bounded_opt::<_, 2>",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp_month: Option<String>,
    /// Expiry year, four digits at most.
    #[serde(
        default,
        deserialize_with = "bounded_opt::<_, 4>",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp_year: Option<String>,
    /// Cardholder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Card verification code, four characters at most.
    #[serde(
        default,
        deserialize_with = "bounded_opt::<_, 4>",
        skip_serializing_if = "Option::is_none"
    )]
    pub cvc: Option<String>,
    /// Verification checks already performed by the caller.
    #[serde(default)]
    pub checks_performed: Vec<String>,
    /// Issuer identification number, six digits at most.
    #[serde(
        default,
        deserialize_with = "bounded_opt::<_, 6>",
        skip_serializing_if = "Option::is_none"
    )]
    pub iin: Option<String>,
    /// Funding class for display.
    pub display_card_type: DisplayCardType,
    /// Wallet name for display, when the card came from a wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_wallet_type: Option<String>,
    /// Network brand for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_brand: Option<String>,
    /// Last four digits for display.
    #[serde(
        default,
        deserialize_with = "bounded_opt::<_, 4>",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_last4: Option<String>,
    /// Free-form caller metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Spending allowance the delegation is bounded by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// Grant reason.
    pub reason: AllowanceReason,
    /// Maximum chargeable amount, in minor currency units.
    pub max_amount: u64,
    /// Currency of the allowance.
    pub currency: String,
    /// Session the allowance is scoped to.
    pub checkout_session_id: String,
    /// Merchant the allowance is granted to, 256 characters at most.
    #[serde(deserialize_with = "bounded::<_, 256>")]
    pub merchant_id: String,
    /// RFC 3339 expiry.
    pub expires_at: String,
}

/// Risk signal forwarded with the delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSignal {
    /// Signal kind.
    pub r#type: RiskSignalType,
    /// Score, caller-defined scale.
    pub score: u32,
    /// Recommended action.
    pub action: RiskAction,
}

/// Body for the delegated-payment call.
///
/// Exactly one of `payment_method` and `payment_method_encrypted` is
/// expected server-side; the client sends whichever the caller supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatePaymentRequest {
    /// Cleartext payment method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Encrypted payment method blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_encrypted: Option<String>,
    /// Spending allowance.
    pub allowance: Allowance,
    /// Billing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    /// Risk signals.
    pub risk_signals: Vec<RiskSignal>,
    /// Free-form caller metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Delegated-payment success payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatePaymentResponse {
    /// Vault token identifying the delegated method.
    pub id: String,
    /// RFC 3339 creation time.
    pub created: String,
    /// Metadata echoed back.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Delegated-payment error detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatePaymentError {
    /// Error class.
    pub r#type: DelegatedErrorType,
    /// Machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Offending parameter, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// Delegated-payment error envelope, `{"error": {...}}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatePaymentErrorResponse {
    /// The error detail.
    pub error: DelegatePaymentError,
}

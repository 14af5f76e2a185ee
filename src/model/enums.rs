//! Closed wire vocabularies.
//!
//! Wire strings are coerced into closed enums. Case folding depends on the
//! vocabulary: codes (currency, country) are uppercased before matching,
//! type enums (status, provider, payment method) are lowercased. Everything
//! fails closed on no match, with one documented exception: the payment
//! provider falls back to the default provider instead of failing. That shim
//! exists for legacy payloads only and must not be generalized to other
//! enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::ClientError;

/// Supported currency codes (ISO 4217), uppercased before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// United States dollar.
    Usd,
}

impl CurrencyCode {
    /// Wire form of the code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            other => Err(ClientError::Validation(format!("unknown currency code {other:?}"))),
        }
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Supported country codes (ISO 3166-1 alpha-2), uppercased before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CountryCode {
    /// United States.
    Us,
}

impl CountryCode {
    /// Wire form of the code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "US",
        }
    }
}

impl FromStr for CountryCode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "US" => Ok(Self::Us),
            other => Err(ClientError::Validation(format!("unknown country code {other:?}"))),
        }
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Payment providers. Lowercased before matching.
///
/// Unknown values fall back to [`PaymentProviderType::Stripe`] rather than
/// failing — a compatibility shim for legacy payloads that sent a payment
/// method where a provider belongs. The fallback can mask genuinely
/// malformed input; it is preserved deliberately and applies to this field
/// only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProviderType {
    /// Stripe, the default provider.
    #[default]
    Stripe,
}

impl PaymentProviderType {
    /// Parses a wire string, falling back to the default provider on no
    /// match.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "stripe" => Self::Stripe,
            // Legacy fallback; see the type-level docs.
            _ => Self::default(),
        }
    }

    /// Wire form of the provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
        }
    }
}

impl<'de> Deserialize<'de> for PaymentProviderType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

/// Payment method kinds. Lowercased before matching; fails closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    /// Card payment.
    Card,
}

impl FromStr for PaymentMethodType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            other => Err(ClientError::Validation(format!("unknown payment method {other:?}"))),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentMethodType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Checkout session status. Lowercased before matching; fails closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    /// Missing information before payment can proceed.
    NotReadyForPayment,
    /// Cart can be completed.
    ReadyForPayment,
    /// Order placed.
    Completed,
    /// Session canceled.
    Canceled,
}

impl FromStr for CartStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "not_ready_for_payment" => Ok(Self::NotReadyForPayment),
            "ready_for_payment" => Ok(Self::ReadyForPayment),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            other => Err(ClientError::Validation(format!("unknown cart status {other:?}"))),
        }
    }
}

impl<'de> Deserialize<'de> for CartStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Role of a cart total line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalType {
    /// Base amount of all items before adjustments.
    ItemsBaseAmount,
    /// Item-level discount.
    ItemsDiscount,
    /// Subtotal.
    Subtotal,
    /// Cart-level discount.
    Discount,
    /// Fulfillment cost.
    Fulfillment,
    /// Tax.
    Tax,
    /// Fee.
    Fee,
    /// Grand total.
    Total,
}

/// Message kind: informational or error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Informational message.
    Info,
    /// Error message; carries a [`MessageErrorCode`].
    Error,
}

/// Rendering of message content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageContentType {
    /// Plain text.
    Plain,
    /// Markdown.
    Markdown,
}

/// Error code carried by error-typed messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageErrorCode {
    /// Required input missing.
    Missing,
    /// Input invalid.
    Invalid,
    /// Item cannot be fulfilled.
    OutOfStock,
    /// Payment was declined.
    PaymentDeclined,
    /// Buyer must sign in.
    RequiresSignIn,
    /// 3-D Secure challenge required.
    #[serde(rename = "requires_3ds")]
    Requires3ds,
}

/// Kind of an informational link on the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// Terms of use.
    TermsOfUse,
    /// Privacy policy.
    PrivacyPolicy,
    /// Seller shop policies.
    SellerShopPolicies,
    /// Product page.
    ProductLink,
    /// Return policy.
    ReturnPolicy,
}

/// Way to receive cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentOptionType {
    /// Physical shipping.
    Shipping,
    /// Digital delivery.
    Digital,
}

/// Checkout-side error envelope type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorResponseType {
    /// Request was rejected as invalid.
    InvalidRequest,
}

/// Checkout-side error envelope code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorResponseCode {
    /// Retried request differed from the original under the same key.
    RequestNotIdempotent,
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PaymentProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

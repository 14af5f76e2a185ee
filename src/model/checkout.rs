//! Checkout session domain model.
//!
//! Typed entities for the session lifecycle, plus the request/response
//! envelopes that mirror the cart per direction. All entities are immutable
//! value objects reconstructed fresh from each wire payload; derived views
//! are recomputed on every access rather than cached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ClientError, Result},
    model::{
        enums::{
            CartStatus, CountryCode, CurrencyCode, ErrorResponseCode, ErrorResponseType,
            FulfillmentOptionType, LinkType, MessageContentType, MessageErrorCode, MessageType,
            PaymentMethodType, PaymentProviderType, TotalType,
        },
        money::decimal_string,
        target::{target_for_path, Target},
    },
};

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Recipient name.
    pub name: String,
    /// First address line.
    pub line_one: String,
    /// Second address line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_two: Option<String>,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Country, uppercased before matching.
    pub country: CountryCode,
    /// Postal code.
    pub postal_code: String,
}

/// Buyer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Item reference in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Listing identifier.
    pub id: String,
    /// Requested quantity.
    pub quantity: u32,
}

/// Payment provider advertised on an initialized session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProvider {
    /// Merchant account at the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    /// Provider; unknown wire values fall back to the default provider.
    pub provider: PaymentProviderType,
    /// Payment methods the provider accepts.
    #[serde(default)]
    pub supported_payment_methods: Vec<PaymentMethodType>,
}

/// Informational or error message attached to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message kind.
    pub r#type: MessageType,
    /// Content rendering.
    pub content_type: MessageContentType,
    /// Human-readable content.
    pub content: String,
    /// Error code; required in practice for error-typed messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<MessageErrorCode>,
    /// Structured path into the request body that produced the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Informational link attached to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link kind.
    pub r#type: LinkType,
    /// Link destination; the wire key is `url`.
    #[serde(rename = "url")]
    pub value: String,
}

/// Item as echoed back inside a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Listing identifier.
    pub id: String,
    /// Quantity.
    pub quantity: u32,
}

/// Priced cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line identifier.
    pub id: String,
    /// The item this line prices.
    pub item: ItemSummary,
    /// Base amount before adjustments.
    #[serde(with = "decimal_string")]
    pub base_amount: Decimal,
    /// Discount on this line.
    #[serde(with = "decimal_string")]
    pub discount: Decimal,
    /// Subtotal.
    #[serde(with = "decimal_string")]
    pub subtotal: Decimal,
    /// Tax.
    #[serde(with = "decimal_string")]
    pub tax: Decimal,
    /// Line total.
    #[serde(with = "decimal_string")]
    pub total: Decimal,
}

/// Typed cart total line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Total {
    /// Role of this total.
    pub r#type: TotalType,
    /// Display label.
    pub display_text: String,
    /// Amount.
    #[serde(with = "decimal_string")]
    pub amount: Decimal,
}

/// A way to receive the cart contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOption {
    /// Shipping or digital.
    pub r#type: FulfillmentOptionType,
    /// Option identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Display subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Carrier name; legacy payloads send the wire key `carrier_info`.
    #[serde(default, alias = "carrier_info", skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Earliest delivery estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_delivery_time: Option<DateTime<Utc>>,
    /// Latest delivery estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_delivery_time: Option<DateTime<Utc>>,
    /// Subtotal.
    #[serde(with = "decimal_string")]
    pub subtotal: Decimal,
    /// Tax.
    #[serde(with = "decimal_string")]
    pub tax: Decimal,
    /// Total.
    #[serde(with = "decimal_string")]
    pub total: Decimal,
}

/// Fulfillment option re-validated to the shipping variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingOption(pub FulfillmentOption);

impl TryFrom<FulfillmentOption> for ShippingOption {
    type Error = ClientError;

    fn try_from(option: FulfillmentOption) -> Result<Self> {
        if option.r#type == FulfillmentOptionType::Shipping {
            Ok(Self(option))
        } else {
            Err(ClientError::Validation(format!(
                "fulfillment option {:?} is not a shipping option",
                option.id
            )))
        }
    }
}

/// Order placed by completing a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: String,
    /// Session the order was placed from.
    pub checkout_session_id: String,
    /// Permalink to the order.
    pub permalink_url: String,
}

/// Stricter view of an error-typed [`Message`].
///
/// Built only from messages that already carry a code; a code-less error
/// message is a contract violation, not recoverable data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartError {
    /// Error code.
    pub code: MessageErrorCode,
    /// Human-readable content.
    pub content: String,
    /// Content rendering.
    pub content_type: MessageContentType,
    /// Structured path that produced the error.
    pub path: Option<String>,
}

impl CartError {
    /// Converts an error-typed message into a cart error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when the message carries no code.
    pub fn from_message(message: &Message) -> Result<Self> {
        let code = message
            .code
            .ok_or_else(|| ClientError::Validation("error messages must include a code".to_owned()))?;
        Ok(Self {
            code,
            content: message.content.clone(),
            content_type: message.content_type,
            path: message.path.clone(),
        })
    }

    /// Semantic target derived from the structured path.
    #[must_use]
    pub fn target(&self) -> Target {
        Target { id: None, target_type: target_for_path(self.path.as_deref()) }
    }

    /// Whether the error is recoverable.
    ///
    /// Currently a fixed `true`: nothing on the wire distinguishes
    /// recoverable from fatal errors yet.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }
}

/// Converts all error-typed messages into cart errors.
fn errors_from_messages(messages: &[Message]) -> Result<Vec<CartError>> {
    messages
        .iter()
        .filter(|message| message.r#type == MessageType::Error)
        .map(CartError::from_message)
        .collect()
}

/// Cart aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Session identifier.
    pub id: String,
    /// Buyer, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    /// Session status.
    pub status: CartStatus,
    /// Cart currency.
    pub currency: CurrencyCode,
    /// Ordered priced lines.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Fulfillment address, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_address: Option<Address>,
    /// Offered fulfillment options.
    #[serde(default)]
    pub fulfillment_options: Vec<FulfillmentOption>,
    /// Selected fulfillment option. The backend enforces that this
    /// references an offered option; the client only surfaces mismatches as
    /// messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_option_id: Option<String>,
    /// Typed totals.
    #[serde(default)]
    pub totals: Vec<Total>,
    /// Messages attached to the cart.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Informational links.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Cart {
    /// Alias view of the fulfillment address.
    #[must_use]
    pub fn shipping_address(&self) -> Option<&Address> {
        self.fulfillment_address.as_ref()
    }

    /// Shipping-typed subset of the fulfillment options, re-validated as
    /// [`ShippingOption`]s. Recomputed on every access; the underlying list
    /// may change between accesses.
    #[must_use]
    pub fn shipping_options(&self) -> Vec<ShippingOption> {
        self.fulfillment_options
            .iter()
            .cloned()
            .filter_map(|option| ShippingOption::try_from(option).ok())
            .collect()
    }

    /// Alias view of the selected fulfillment option id.
    #[must_use]
    pub fn shipping_option_id(&self) -> Option<&str> {
        self.fulfillment_option_id.as_deref()
    }
}

/// Payment token plus billing details for completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentData {
    /// Provider token for the payment method.
    pub token: String,
    /// Provider; unknown wire values fall back to the default provider.
    pub provider: PaymentProviderType,
    /// Billing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

/// Body for session creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartInitializeRequest {
    /// Buyer, when already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    /// Items to put in the cart.
    pub items: Vec<Item>,
    /// Fulfillment address, when already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_address: Option<Address>,
}

impl CartInitializeRequest {
    /// Alias view of the fulfillment address.
    #[must_use]
    pub fn shipping_address(&self) -> Option<&Address> {
        self.fulfillment_address.as_ref()
    }

    /// Alias setter for the fulfillment address.
    pub fn set_shipping_address(&mut self, address: Option<Address>) {
        self.fulfillment_address = address;
    }
}

/// Body for session update. Every field is optional; absent fields are left
/// untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUpdateRequest {
    /// Buyer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    /// Replacement item list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    /// Fulfillment address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_address: Option<Address>,
    /// Selected fulfillment option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_option_id: Option<String>,
}

impl CartUpdateRequest {
    /// Alias view of the fulfillment address.
    #[must_use]
    pub fn shipping_address(&self) -> Option<&Address> {
        self.fulfillment_address.as_ref()
    }

    /// Alias setter for the fulfillment address.
    pub fn set_shipping_address(&mut self, address: Option<Address>) {
        self.fulfillment_address = address;
    }

    /// Alias view of the selected fulfillment option id.
    #[must_use]
    pub fn shipping_option_id(&self) -> Option<&str> {
        self.fulfillment_option_id.as_deref()
    }

    /// Alias setter for the selected fulfillment option id.
    pub fn set_shipping_option_id(&mut self, id: Option<String>) {
        self.fulfillment_option_id = id;
    }
}

/// Body for session completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCompleteRequest {
    /// Buyer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    /// Payment data.
    pub payment_data: PaymentData,
}

impl CartCompleteRequest {
    /// Alias view of the payment data.
    #[must_use]
    pub fn payment_method(&self) -> &PaymentData {
        &self.payment_data
    }

    /// Alias setter for the payment data.
    pub fn set_payment_method(&mut self, payment_data: PaymentData) {
        self.payment_data = payment_data;
    }
}

/// Response to session creation: the cart plus the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartInitializeResponse {
    /// The cart.
    #[serde(flatten)]
    pub cart: Cart,
    /// Provider to collect payment with.
    pub payment_provider: PaymentProvider,
}

impl CartInitializeResponse {
    /// Error-typed messages as [`CartError`]s.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if any error message lacks a
    /// code.
    pub fn errors(&self) -> Result<Vec<CartError>> {
        errors_from_messages(&self.cart.messages)
    }
}

/// Response to session update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUpdateResponse {
    /// The cart.
    #[serde(flatten)]
    pub cart: Cart,
}

impl CartUpdateResponse {
    /// Error-typed messages as [`CartError`]s.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if any error message lacks a
    /// code.
    pub fn errors(&self) -> Result<Vec<CartError>> {
        errors_from_messages(&self.cart.messages)
    }
}

/// Response to session completion: the cart plus the order, once placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCompleteResponse {
    /// The cart.
    #[serde(flatten)]
    pub cart: Cart,
    /// The placed order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

impl CartCompleteResponse {
    /// Error-typed messages as [`CartError`]s.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if any error message lacks a
    /// code.
    pub fn errors(&self) -> Result<Vec<CartError>> {
        errors_from_messages(&self.cart.messages)
    }
}

/// Checkout-side error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Envelope type.
    pub r#type: ErrorResponseType,
    /// Error code.
    pub code: ErrorResponseCode,
    /// Human-readable message.
    pub message: String,
    /// Offending parameter, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

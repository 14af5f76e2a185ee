//! Error-target classification.
//!
//! Maps a structured validation-error path (root-anchored, dot/bracket
//! syntax over the request body) to the semantic part of the domain model
//! the error concerns, so a UI can focus the offending field.
//!
//! Classification is an ordered prefix walk: the path is lowercased and
//! tested against a fixed list of prefixes top to bottom; the first match
//! wins. Prefixes overlap, so order is load-bearing — every leaf prefix must
//! appear before the group prefix that textually contains it, or the leaf
//! would never be reached. Unmatched, empty, and missing paths all resolve
//! to the cart-level fallback.
//!
//! This is a pure function: same path, same target; no state, no I/O.

use serde::{Deserialize, Serialize};

/// Conceptual location in the domain model an error concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum TargetType {
    BuyerFirstName,
    BuyerLastName,
    BuyerEmail,
    BuyerPhoneNumber,
    ShippingAddress,
    ShippingAddressLineOne,
    ShippingAddressLineTwo,
    ShippingAddressCity,
    ShippingAddressState,
    ShippingAddressCountry,
    ShippingAddressPostCode,
    BillingAddress,
    BillingAddressLineOne,
    BillingAddressLineTwo,
    BillingAddressCity,
    BillingAddressState,
    BillingAddressCountry,
    BillingAddressPostCode,
    CartItem,
    Cart,
    ShippingOption,
    PaymentMethod,
}

/// Semantic pointer from a validation error to the domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Identifier of the targeted entity, when one applies.
    pub id: Option<String>,
    /// Targeted location.
    #[serde(rename = "type")]
    pub target_type: TargetType,
}

/// Ordered (prefix, target) pairs, most specific first.
///
/// Leaf prefixes precede their containing group prefix; the two item-list
/// spellings both map to the cart item target.
const PATH_TARGETS: &[(&str, TargetType)] = &[
    ("$.buyer.first_name", TargetType::BuyerFirstName),
    ("$.buyer.last_name", TargetType::BuyerLastName),
    ("$.buyer.email", TargetType::BuyerEmail),
    ("$.buyer.phone_number", TargetType::BuyerPhoneNumber),
    ("$.fulfillment_address.line_one", TargetType::ShippingAddressLineOne),
    ("$.fulfillment_address.line_two", TargetType::ShippingAddressLineTwo),
    ("$.fulfillment_address.city", TargetType::ShippingAddressCity),
    ("$.fulfillment_address.state", TargetType::ShippingAddressState),
    ("$.fulfillment_address.country", TargetType::ShippingAddressCountry),
    ("$.fulfillment_address.postal_code", TargetType::ShippingAddressPostCode),
    ("$.fulfillment_address", TargetType::ShippingAddress),
    ("$.payment_data.billing_address.line_one", TargetType::BillingAddressLineOne),
    ("$.payment_data.billing_address.line_two", TargetType::BillingAddressLineTwo),
    ("$.payment_data.billing_address.city", TargetType::BillingAddressCity),
    ("$.payment_data.billing_address.state", TargetType::BillingAddressState),
    ("$.payment_data.billing_address.country", TargetType::BillingAddressCountry),
    ("$.payment_data.billing_address.postal_code", TargetType::BillingAddressPostCode),
    ("$.payment_data.billing_address", TargetType::BillingAddress),
    ("$.payment_data", TargetType::PaymentMethod),
    ("$.line_items", TargetType::CartItem),
    ("$.items", TargetType::CartItem),
    ("$.fulfillment_option_id", TargetType::ShippingOption),
    ("$.fulfillment_options", TargetType::ShippingOption),
];

/// Classifies a structured error path into a [`TargetType`].
///
/// Missing, empty, and unmatched paths return [`TargetType::Cart`].
#[must_use]
pub fn target_for_path(path: Option<&str>) -> TargetType {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return TargetType::Cart;
    };
    let normalized = path.to_ascii_lowercase();
    for (prefix, target) in PATH_TARGETS {
        if normalized.starts_with(prefix) {
            return *target;
        }
    }
    TargetType::Cart
}

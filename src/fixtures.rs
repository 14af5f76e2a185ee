//! Canned payload factories for conformance scenarios.
//!
//! Each factory returns a fresh value; tests mutate their local copy to
//! build deliberately broken variants before re-submission.

use std::collections::HashMap;

use crate::model::{
    Address, Allowance, AllowanceReason, Buyer, CardNumberType, CartCompleteRequest,
    CartInitializeRequest, CartUpdateRequest, CountryCode, DelegatePaymentRequest,
    DisplayCardType, Item, PaymentData, PaymentMethod, PaymentMethodType, PaymentProviderType,
    RiskAction, RiskSignal, RiskSignalType,
};

/// Listing the mock merchant always has in stock.
pub const ITEM_LISTING_ID: &str = "item_123";

/// Listing the mock merchant reports as out of stock.
pub const ITEM_LISTING_ID_OUT_OF_STOCK: &str = "item_out_of_stock";

/// Provider token accepted by the mock merchant.
pub const TEST_PAYMENT_TOKEN: &str = "test-payment-token-1";

/// Complete fulfillment address.
#[must_use]
pub fn address() -> Address {
    Address {
        name: "John Doe".to_owned(),
        line_one: "123 Main St".to_owned(),
        line_two: None,
        city: "San Francisco".to_owned(),
        state: "CA".to_owned(),
        country: CountryCode::Us,
        postal_code: "94101".to_owned(),
    }
}

/// Buyer with all fields populated.
#[must_use]
pub fn buyer() -> Buyer {
    Buyer {
        name: Some("John Doe".to_owned()),
        email: "john.doe@example.com".to_owned(),
        phone_number: Some("1234567890".to_owned()),
    }
}

/// Session-create payload with one item and a full address.
#[must_use]
pub fn cart_initialize_payload(item_listing_id: &str, quantity: u32) -> CartInitializeRequest {
    CartInitializeRequest {
        buyer: None,
        items: vec![Item { id: item_listing_id.to_owned(), quantity }],
        fulfillment_address: Some(address()),
    }
}

/// Session-update payload selecting a fulfillment option.
#[must_use]
pub fn cart_update_payload(fulfillment_option_id: &str) -> CartUpdateRequest {
    CartUpdateRequest {
        buyer: None,
        items: Some(vec![Item { id: ITEM_LISTING_ID.to_owned(), quantity: 2 }]),
        fulfillment_address: Some(address()),
        fulfillment_option_id: Some(fulfillment_option_id.to_owned()),
    }
}

/// Session-complete payload with the test payment token.
#[must_use]
pub fn cart_complete_payload() -> CartCompleteRequest {
    CartCompleteRequest {
        buyer: Some(buyer()),
        payment_data: PaymentData {
            token: TEST_PAYMENT_TOKEN.to_owned(),
            provider: PaymentProviderType::Stripe,
            billing_address: Some(address()),
        },
    }
}

/// Create payload whose address is missing its postal code.
#[must_use]
pub fn incomplete_address_payload() -> CartInitializeRequest {
    let mut payload = cart_initialize_payload(ITEM_LISTING_ID, 1);
    if let Some(address) = payload.fulfillment_address.as_mut() {
        address.postal_code = String::new();
    }
    payload
}

/// Create payload referencing the out-of-stock listing.
#[must_use]
pub fn out_of_stock_payload() -> CartInitializeRequest {
    cart_initialize_payload(ITEM_LISTING_ID_OUT_OF_STOCK, 1)
}

/// Delegated-payment payload with a cleartext card and a one-time allowance.
#[must_use]
pub fn delegate_payment_payload() -> DelegatePaymentRequest {
    let payment_method = PaymentMethod {
        r#type: PaymentMethodType::Card,
        card_number_type: CardNumberType::Fpan,
        virtual_card: false,
        card_number: "4111111111111111".to_owned(),
        exp_month: Some("12".to_owned()),
        exp_year: Some("2030".to_owned()),
        name: Some("Jane Doe".to_owned()),
        cvc: Some("123".to_owned()),
        checks_performed: Vec::new(),
        iin: Some("411111".to_owned()),
        display_card_type: DisplayCardType::Credit,
        display_wallet_type: None,
        display_brand: Some("Visa".to_owned()),
        display_last4: Some("1111".to_owned()),
        metadata: HashMap::new(),
    };
    let allowance = Allowance {
        reason: AllowanceReason::OneTime,
        max_amount: 100,
        currency: "USD".to_owned(),
        checkout_session_id: "dummy_session".to_owned(),
        merchant_id: "dummy_merchant".to_owned(),
        expires_at: "2025-12-31T23:59:59Z".to_owned(),
    };
    let billing_address = Address {
        name: "Jane Doe".to_owned(),
        line_one: "456 Second St".to_owned(),
        line_two: None,
        city: "New York".to_owned(),
        state: "NY".to_owned(),
        country: CountryCode::Us,
        postal_code: "10001".to_owned(),
    };

    DelegatePaymentRequest {
        payment_method: Some(payment_method),
        payment_method_encrypted: None,
        allowance,
        billing_address: Some(billing_address),
        risk_signals: vec![RiskSignal {
            r#type: RiskSignalType::CardTesting,
            score: 10,
            action: RiskAction::Authorized,
        }],
        metadata: HashMap::new(),
    }
}

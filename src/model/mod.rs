//! Strict domain model over the loosely-typed wire protocol.
//!
//! Wire payloads arrive as JSON with string-encoded money, case-varying
//! enum spellings, and structured error paths. This module normalizes them
//! into typed value objects that fail closed on anything outside the closed
//! vocabularies, with one documented provider fallback.

pub mod checkout;
pub mod enums;
pub mod money;
pub mod payment;
pub mod target;

pub use checkout::{
    Address, Buyer, Cart, CartCompleteRequest, CartCompleteResponse, CartError,
    CartInitializeRequest, CartInitializeResponse, CartUpdateRequest, CartUpdateResponse,
    ErrorResponse, FulfillmentOption, Item, ItemSummary, LineItem, Link, Message, Order,
    PaymentData, PaymentProvider, ShippingOption, Total,
};
pub use enums::{
    CartStatus, CountryCode, CurrencyCode, ErrorResponseCode, ErrorResponseType,
    FulfillmentOptionType, LinkType, MessageContentType, MessageErrorCode, MessageType,
    PaymentMethodType, PaymentProviderType, TotalType,
};
pub use money::parse_decimal;
pub use payment::{
    Allowance, AllowanceReason, CardNumberType, DelegatePaymentError,
    DelegatePaymentErrorResponse, DelegatePaymentRequest, DelegatePaymentResponse,
    DelegatedErrorType, DisplayCardType, PaymentMethod, RiskAction, RiskSignal, RiskSignalType,
};
pub use target::{target_for_path, Target, TargetType};

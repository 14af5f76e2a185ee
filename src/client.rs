//! Checkout protocol client.
//!
//! Composes the domain model, the request signer, and an HTTP transport
//! into the five protocol operations. The body is serialized exactly once
//! per call; the signed bytes and the sent bytes are always the same
//! buffer. Body-less calls sign `{}` and send nothing.

use serde::Serialize;

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    model::{
        Cart, CartCompleteRequest, CartCompleteResponse, CartInitializeRequest,
        CartInitializeResponse, CartUpdateRequest, CartUpdateResponse, DelegatePaymentErrorResponse,
        DelegatePaymentRequest, DelegatePaymentResponse,
    },
    protocol,
    signer::{RequestSigner, SignOptions},
    transport::{ApiResponse, HttpTransport, Transport},
};

/// Result of a delegated-payment call.
///
/// The endpoint has a distinct error envelope instead of riding errors on
/// the success body, so rejection is a normal outcome, not a client error.
#[derive(Debug, Clone)]
pub enum DelegatePaymentOutcome {
    /// The payment method was vaulted.
    Authorized(DelegatePaymentResponse),
    /// The endpoint rejected the delegation.
    Rejected(DelegatePaymentErrorResponse),
}

/// Signed client over the checkout and delegated-payment endpoints.
///
/// Holds no per-call state; any number of calls may run concurrently.
#[derive(Debug)]
pub struct CheckoutClient<T = HttpTransport> {
    transport: T,
    signer: RequestSigner,
    payment_base_url: String,
}

impl CheckoutClient<HttpTransport> {
    /// Builds a client over a pooled HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the configuration fails
    /// validation, and [`ClientError::Http`] if the transport cannot be
    /// built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.checkout_base_url, config.timeout())?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> CheckoutClient<T> {
    /// Builds a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the configuration fails
    /// validation.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            signer: RequestSigner::from_config(config)?,
            payment_base_url: config.payment_base_url.clone(),
        })
    }

    /// Creates a checkout session.
    ///
    /// # Errors
    ///
    /// Fails on serialization, transport, or response-validation errors.
    /// Business-level problems arrive as error messages on the returned
    /// cart, not as client errors.
    pub async fn create_session(
        &self,
        request: &CartInitializeRequest,
        options: &SignOptions,
    ) -> Result<CartInitializeResponse> {
        let body = serialize_body(request)?;
        let response = self
            .request(protocol::REST_METHOD_POST, protocol::CHECKOUT_INITIALIZE_PATH, Some(&body), options)
            .await?;
        response.body.parse()
    }

    /// Updates a checkout session.
    ///
    /// # Errors
    ///
    /// Fails on serialization, transport, or response-validation errors.
    pub async fn update_session(
        &self,
        session_id: &str,
        request: &CartUpdateRequest,
        options: &SignOptions,
    ) -> Result<CartUpdateResponse> {
        let body = serialize_body(request)?;
        let path = protocol::checkout_session_path(session_id);
        let response =
            self.request(protocol::REST_METHOD_POST, &path, Some(&body), options).await?;
        response.body.parse()
    }

    /// Fetches a checkout session.
    ///
    /// The call carries no body; the signature covers `{}`.
    ///
    /// # Errors
    ///
    /// Fails on transport or response-validation errors.
    pub async fn get_session(&self, session_id: &str, options: &SignOptions) -> Result<Cart> {
        let path = protocol::checkout_session_path(session_id);
        let response = self.request(protocol::REST_METHOD_GET, &path, None, options).await?;
        response.body.parse()
    }

    /// Completes a checkout session, placing the order.
    ///
    /// # Errors
    ///
    /// Fails on serialization, transport, or response-validation errors.
    pub async fn complete_session(
        &self,
        session_id: &str,
        request: &CartCompleteRequest,
        options: &SignOptions,
    ) -> Result<CartCompleteResponse> {
        let body = serialize_body(request)?;
        let path = protocol::checkout_complete_path(session_id);
        let response =
            self.request(protocol::REST_METHOD_POST, &path, Some(&body), options).await?;
        response.body.parse()
    }

    /// Delegates a payment method on behalf of a cart.
    ///
    /// Targets the payment base URL rather than the checkout base URL.
    ///
    /// # Errors
    ///
    /// Fails on serialization, transport, or response-validation errors.
    /// A well-formed rejection envelope is returned as
    /// [`DelegatePaymentOutcome::Rejected`], not as an error.
    pub async fn delegated_payment(
        &self,
        request: &DelegatePaymentRequest,
        options: &SignOptions,
    ) -> Result<DelegatePaymentOutcome> {
        let body = serialize_body(request)?;
        let url = format!(
            "{}{}",
            self.payment_base_url.trim_end_matches('/'),
            protocol::DELEGATE_PAYMENT_PATH
        );
        let response =
            self.request(protocol::REST_METHOD_POST, &url, Some(&body), options).await?;

        if response.status < 400 {
            Ok(DelegatePaymentOutcome::Authorized(response.body.parse()?))
        } else {
            Ok(DelegatePaymentOutcome::Rejected(response.body.parse()?))
        }
    }

    /// Signs and executes an arbitrary call, returning the raw response.
    ///
    /// Escape hatch for conformance scenarios that need the status code and
    /// response headers, or that deliberately corrupt the header set via
    /// [`SignOptions`] omissions and overrides.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn request_raw(
        &self,
        method: &str,
        path_or_url: &str,
        body: Option<&[u8]>,
        options: &SignOptions,
    ) -> Result<ApiResponse> {
        self.request(method, path_or_url, body, options).await
    }

    async fn request(
        &self,
        method: &str,
        path_or_url: &str,
        body: Option<&[u8]>,
        options: &SignOptions,
    ) -> Result<ApiResponse> {
        let headers = self.signer.headers(body, options);
        self.transport.execute(method, path_or_url, body, &headers).await
    }
}

/// Serializes a request body to the exact bytes that are signed and sent.
fn serialize_body<B: Serialize>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| ClientError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use serde_json::json;

    use super::*;
    use crate::{
        model::{CartStatus, Item},
        transport::ResponseBody,
    };

    struct RecordedCall {
        method: String,
        path_or_url: String,
        body: Option<Vec<u8>>,
        headers: HashMap<String, String>,
    }

    /// Transport double that records calls and replays canned responses.
    struct MockTransport {
        calls: Mutex<Vec<RecordedCall>>,
        responses: Mutex<Vec<ApiResponse>>,
    }

    impl MockTransport {
        fn returning(responses: Vec<ApiResponse>) -> Self {
            Self { calls: Mutex::new(Vec::new()), responses: Mutex::new(responses) }
        }

        fn json_response(status: u16, body: serde_json::Value) -> ApiResponse {
            ApiResponse { status, body: ResponseBody::Json(body), headers: Vec::new() }
        }

        fn calls(&self) -> Vec<RecordedCall> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    impl Transport for &MockTransport {
        async fn execute(
            &self,
            method: &str,
            path_or_url: &str,
            body: Option<&[u8]>,
            headers: &HashMap<String, String>,
        ) -> Result<ApiResponse> {
            self.calls.lock().unwrap().push(RecordedCall {
                method: method.to_owned(),
                path_or_url: path_or_url.to_owned(),
                body: body.map(<[u8]>::to_vec),
                headers: headers.clone(),
            });
            Ok(self.responses.lock().unwrap().remove(0))
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new(
            "https://merchant.example.com",
            "https://psp.example.com",
            "c2VjcmV0LWtleQ==",
        )
    }

    fn cart_body(status: &str) -> serde_json::Value {
        json!({
            "id": "cs_123",
            "status": status,
            "currency": "usd",
            "line_items": [],
            "fulfillment_options": [],
            "totals": [],
            "messages": [],
            "links": []
        })
    }

    #[tokio::test]
    async fn test_create_session_posts_to_collection() {
        let mut success = cart_body("not_ready_for_payment");
        success["payment_provider"] = json!({"provider": "stripe"});
        let transport = MockTransport::returning(vec![MockTransport::json_response(201, success)]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let request = CartInitializeRequest {
            buyer: None,
            items: vec![Item { id: "item_123".to_owned(), quantity: 1 }],
            fulfillment_address: None,
        };
        let response = client.create_session(&request, &SignOptions::default()).await.unwrap();
        assert_eq!(response.cart.id, "cs_123");

        let calls = transport.calls();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path_or_url, "/checkout_sessions");
    }

    #[tokio::test]
    async fn test_signed_bytes_are_sent_bytes() {
        let mut success = cart_body("not_ready_for_payment");
        success["payment_provider"] = json!({"provider": "stripe"});
        let transport = MockTransport::returning(vec![MockTransport::json_response(201, success)]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let request = CartInitializeRequest {
            buyer: None,
            items: vec![Item { id: "item_123".to_owned(), quantity: 2 }],
            fulfillment_address: None,
        };
        client.create_session(&request, &SignOptions::default()).await.unwrap();

        let calls = transport.calls();
        let call = &calls[0];
        let sent = call.body.as_deref().unwrap();

        let signer = RequestSigner::from_config(&config()).unwrap();
        let expected = signer.signature(&call.headers["Timestamp"], sent);
        assert_eq!(call.headers["Signature"], expected);
    }

    #[tokio::test]
    async fn test_get_session_sends_no_body_signs_empty_object() {
        let transport = MockTransport::returning(vec![MockTransport::json_response(
            200,
            cart_body("ready_for_payment"),
        )]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let cart = client.get_session("cs_123", &SignOptions::default()).await.unwrap();
        assert_eq!(cart.status, CartStatus::ReadyForPayment);

        let calls = transport.calls();
        let call = &calls[0];
        assert_eq!(call.method, "GET");
        assert_eq!(call.path_or_url, "/checkout_sessions/cs_123");
        assert!(call.body.is_none());

        let signer = RequestSigner::from_config(&config()).unwrap();
        let expected = signer.signature(&call.headers["Timestamp"], b"{}");
        assert_eq!(call.headers["Signature"], expected);
    }

    #[tokio::test]
    async fn test_update_session_targets_session_item() {
        let transport = MockTransport::returning(vec![MockTransport::json_response(
            200,
            cart_body("ready_for_payment"),
        )]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let request = CartUpdateRequest {
            fulfillment_option_id: Some("fo_standard".to_owned()),
            ..CartUpdateRequest::default()
        };
        client.update_session("cs_123", &request, &SignOptions::default()).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].path_or_url, "/checkout_sessions/cs_123");
        assert_eq!(calls[0].method, "POST");
    }

    #[tokio::test]
    async fn test_complete_session_targets_complete_path() {
        let mut body = cart_body("completed");
        body["order"] = json!({
            "id": "ord_1",
            "checkout_session_id": "cs_123",
            "permalink_url": "https://merchant.example.com/orders/ord_1"
        });
        let transport = MockTransport::returning(vec![MockTransport::json_response(200, body)]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let request: CartCompleteRequest = serde_json::from_value(json!({
            "payment_data": {"token": "tok_1", "provider": "stripe"}
        }))
        .unwrap();
        let response =
            client.complete_session("cs_123", &request, &SignOptions::default()).await.unwrap();
        assert_eq!(response.order.unwrap().id, "ord_1");

        let calls = transport.calls();
        assert_eq!(calls[0].path_or_url, "/checkout_sessions/cs_123/complete");
    }

    #[tokio::test]
    async fn test_delegated_payment_uses_payment_base_url() {
        let transport = MockTransport::returning(vec![MockTransport::json_response(
            201,
            json!({"id": "vt_1", "created": "2026-01-01T00:00:00Z"}),
        )]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let request: DelegatePaymentRequest = serde_json::from_value(json!({
            "payment_method_encrypted": "enc",
            "allowance": {
                "reason": "one_time",
                "max_amount": 4817,
                "currency": "usd",
                "checkout_session_id": "cs_123",
                "merchant_id": "merchant_1",
                "expires_at": "2026-01-01T00:00:00Z"
            },
            "risk_signals": []
        }))
        .unwrap();
        let outcome =
            client.delegated_payment(&request, &SignOptions::default()).await.unwrap();
        assert!(matches!(outcome, DelegatePaymentOutcome::Authorized(r) if r.id == "vt_1"));

        let calls = transport.calls();
        assert_eq!(calls[0].path_or_url, "https://psp.example.com/delegated_payments");
    }

    #[tokio::test]
    async fn test_delegated_payment_rejection_is_an_outcome() {
        let transport = MockTransport::returning(vec![MockTransport::json_response(
            400,
            json!({"error": {
                "type": "invalid_request",
                "code": "allowance_expired",
                "message": "allowance has expired"
            }}),
        )]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let request: DelegatePaymentRequest = serde_json::from_value(json!({
            "allowance": {
                "reason": "one_time",
                "max_amount": 1,
                "currency": "usd",
                "checkout_session_id": "cs_123",
                "merchant_id": "merchant_1",
                "expires_at": "2020-01-01T00:00:00Z"
            },
            "risk_signals": []
        }))
        .unwrap();
        let outcome =
            client.delegated_payment(&request, &SignOptions::default()).await.unwrap();
        assert!(
            matches!(outcome, DelegatePaymentOutcome::Rejected(r) if r.error.code == "allowance_expired")
        );
    }

    #[tokio::test]
    async fn test_text_response_is_validation_error() {
        let transport = MockTransport::returning(vec![ApiResponse {
            status: 200,
            body: ResponseBody::Text("<html>gateway error</html>".to_owned()),
            headers: Vec::new(),
        }]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let result = client.get_session("cs_123", &SignOptions::default()).await;
        assert!(matches!(result.unwrap_err(), ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_request_raw_applies_overrides_on_wire() {
        let transport =
            MockTransport::returning(vec![MockTransport::json_response(401, json!({}))]);
        let client = CheckoutClient::with_transport(&config(), &transport).unwrap();

        let options = SignOptions {
            overrides: vec![("Signature".to_owned(), "garbage".to_owned())],
            ..SignOptions::default()
        };
        let response = client
            .request_raw("POST", "/checkout_sessions", Some(b"{}"), &options)
            .await
            .unwrap();
        assert_eq!(response.status, 401);

        let calls = transport.calls();
        assert_eq!(calls[0].headers["Signature"], "garbage");
    }

    #[test]
    fn test_with_transport_rejects_invalid_config() {
        let transport = MockTransport::returning(vec![]);
        let mut bad = config();
        bad.private_key = String::new();
        assert!(CheckoutClient::with_transport(&bad, &transport).is_err());
    }
}

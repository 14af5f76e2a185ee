//! HTTP transport collaborator.
//!
//! The core calls out to "an HTTP transport" and assumes nothing beyond the
//! [`Transport`] contract: issue `METHOD path` with a JSON body and a header
//! map, return status code, parsed JSON-or-text body, and response headers.
//! Relative paths resolve against a configurable base URL; absolute URLs
//! pass through untouched. Cancellation and timeouts are entirely the
//! transport's responsibility.

use std::{collections::HashMap, time::Duration};

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::{ClientError, Result};

/// Response body: JSON when the payload parses, raw text otherwise.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// Parsed JSON payload.
    Json(serde_json::Value),
    /// Non-JSON payload, kept verbatim.
    Text(String),
}

impl ResponseBody {
    /// Returns the JSON payload, if the body parsed as JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Deserializes the JSON payload into a domain type.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the body is not JSON or fails
    /// strict domain validation.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Self::Json(value) => serde_json::from_value(value.clone())
                .map_err(|e| ClientError::Validation(e.to_string())),
            Self::Text(text) => {
                Err(ClientError::Validation(format!("expected JSON body, got text: {text:?}")))
            }
        }
    }
}

/// One executed call: status, body, response headers.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: ResponseBody,
    /// Response headers as (name, value) pairs.
    pub headers: Vec<(String, String)>,
}

impl ApiResponse {
    /// First value of a response header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Outbound HTTP contract consumed by the client core.
pub trait Transport {
    /// Executes `method` against `path_or_url` with the given body bytes and
    /// header map.
    ///
    /// Relative paths resolve against the transport's base URL; absolute
    /// `http(s)` URLs are used as-is.
    fn execute(
        &self,
        method: &str,
        path_or_url: &str,
        body: Option<&[u8]>,
        headers: &HashMap<String, String>,
    ) -> impl std::future::Future<Output = Result<ApiResponse>> + Send;
}

/// Validates a header pair against CRLF/null injection.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.contains('\r') || name.contains('\n') || name.contains('\0') {
        return Err(ClientError::Transport(
            "invalid header name: control characters not allowed".to_owned(),
        ));
    }
    if value.contains('\r') || value.contains('\n') || value.contains('\0') {
        return Err(ClientError::Transport(
            "invalid header value: control characters not allowed".to_owned(),
        ));
    }
    Ok(())
}

/// Resolves a path against a base URL.
///
/// Absolute `http(s)` inputs pass through untouched.
#[must_use]
fn resolve_url(base_url: &str, path_or_url: &str) -> String {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        return path_or_url.to_owned();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), path_or_url.trim_start_matches('/'))
}

/// Transport over reqwest with a pooled client and a total-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport resolving relative paths against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying client cannot be
    /// built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.to_owned() })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, body, headers), fields(method, path_or_url))]
    async fn execute(
        &self,
        method: &str,
        path_or_url: &str,
        body: Option<&[u8]>,
        headers: &HashMap<String, String>,
    ) -> Result<ApiResponse> {
        let url = resolve_url(&self.base_url, path_or_url);

        let method = reqwest::Method::from_bytes(method.as_bytes())
            .map_err(|_| ClientError::Transport(format!("unsupported HTTP method: {method}")))?;

        let mut request = self.client.request(method, &url);
        for (name, value) in headers {
            validate_header(name, value)?;
            request = request.header(name, value);
        }
        if let Some(bytes) = body {
            request = request.body(bytes.to_vec());
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();

        let text = response.text().await?;
        let body = match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        };

        Ok(ApiResponse { status, body, headers })
    }
}

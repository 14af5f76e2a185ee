//! Client configuration types.
//!
//! [`ClientConfig`] is built once at process start, validated, and passed by
//! reference to the signer and transport. It is never mutated afterwards;
//! any number of signing or validation operations may share it without
//! coordination.

use std::time::Duration;

use base64::Engine;
use serde::Deserialize;
use url::Url;

use crate::{
    error::{ClientError, Result},
    protocol,
};

/// Immutable client configuration.
///
/// Deserializable from TOML:
///
/// ```toml
/// checkout_base_url = "https://merchant.example.com"
/// payment_base_url = "https://psp.example.com"
/// private_key = "c2VjcmV0LWtleQ=="
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the checkout session endpoints.
    pub checkout_base_url: String,

    /// Base URL for the delegated payment endpoint.
    pub payment_base_url: String,

    /// Base64-encoded pre-shared signing key.
    pub private_key: String,

    /// Protocol version sent in `API-Version`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Language tag sent in `Accept-Language`.
    #[serde(default = "default_language")]
    pub language: String,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Creates a configuration with protocol defaults.
    #[must_use]
    pub fn new(checkout_base_url: &str, payment_base_url: &str, private_key: &str) -> Self {
        Self {
            checkout_base_url: checkout_base_url.to_owned(),
            payment_base_url: payment_base_url.to_owned(),
            private_key: private_key.to_owned(),
            api_version: default_api_version(),
            language: default_language(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the TOML does not parse.
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| ClientError::Configuration(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if:
    /// - either base URL does not parse as an absolute URL
    /// - the private key is empty or not valid base64
    /// - the timeout is zero
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.checkout_base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid checkout_base_url: {e}"))
        })?;
        Url::parse(&self.payment_base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid payment_base_url: {e}")))?;

        if self.private_key.is_empty() {
            return Err(ClientError::Configuration("private_key is empty".to_owned()));
        }
        base64::engine::general_purpose::STANDARD
            .decode(&self.private_key)
            .map_err(|e| ClientError::Configuration(format!("private_key is not base64: {e}")))?;

        if self.timeout_secs == 0 {
            return Err(ClientError::Configuration("timeout_secs must be nonzero".to_owned()));
        }

        Ok(())
    }

    /// Decodes the base64 private key into raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the key is not valid base64.
    pub fn decoded_private_key(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.private_key)
            .map_err(|e| ClientError::Configuration(format!("private_key is not base64: {e}")))
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_api_version() -> String {
    protocol::API_VERSION.to_owned()
}

fn default_language() -> String {
    protocol::DEFAULT_LANGUAGE.to_owned()
}

fn default_user_agent() -> String {
    protocol::USER_AGENT.to_owned()
}

fn default_timeout_secs() -> u64 {
    protocol::DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ClientConfig {
        ClientConfig::new(
            "https://merchant.example.com",
            "https://psp.example.com",
            "c2VjcmV0LWtleQ==",
        )
    }

    #[test]
    fn test_config_defaults() {
        let config = valid_config();
        assert_eq!(config.api_version, "2025-09-29");
        assert_eq!(config.language, "en-us");
        assert_eq!(config.user_agent, "CheckoutSpecTest/1.0");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_from_toml_with_defaults() {
        let toml = r#"
            checkout_base_url = "https://merchant.example.com"
            payment_base_url = "https://psp.example.com"
            private_key = "c2VjcmV0LWtleQ=="
        "#;

        let config = ClientConfig::from_toml(toml).unwrap();
        assert_eq!(config.checkout_base_url, "https://merchant.example.com");
        assert_eq!(config.timeout_secs, 30); // default
        assert_eq!(config.api_version, "2025-09-29"); // default
    }

    #[test]
    fn test_config_from_toml_overrides() {
        let toml = r#"
            checkout_base_url = "https://merchant.example.com"
            payment_base_url = "https://psp.example.com"
            private_key = "c2VjcmV0LWtleQ=="
            timeout_secs = 5
            language = "de-de"
        "#;

        let config = ClientConfig::from_toml(toml).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.language, "de-de");
    }

    #[test]
    fn test_config_from_toml_invalid() {
        let result = ClientConfig::from_toml("not valid toml here =");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ClientError::Configuration(_)));
    }

    #[test]
    fn test_config_rejects_bad_base_url() {
        let mut config = valid_config();
        config.checkout_base_url = "not-a-url".to_owned();
        let result = config.validate();
        assert!(matches!(result.unwrap_err(), ClientError::Configuration(_)));
    }

    #[test]
    fn test_config_rejects_non_base64_key() {
        let mut config = valid_config();
        config.private_key = "%%%not-base64%%%".to_owned();
        let result = config.validate();
        assert!(matches!(result.unwrap_err(), ClientError::Configuration(_)));
        assert!(config.decoded_private_key().is_err());
    }

    #[test]
    fn test_config_rejects_empty_key() {
        let mut config = valid_config();
        config.private_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let mut config = valid_config();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_decoded_private_key_round_trip() {
        let config = valid_config();
        assert_eq!(config.decoded_private_key().unwrap(), b"secret-key");
    }
}

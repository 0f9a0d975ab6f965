use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::error::TokenError;

/// How client credentials are transmitted to the token endpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
    /// `client_id` and `client_secret` as form fields (RFC 6749 §2.3.1
    /// alternative). The default; the feed vendors this client targets
    /// expect form credentials.
    #[default]
    Form,
    /// HTTP Basic authentication (RFC 6749 §2.3.1).
    /// `Authorization: Basic base64(client_id:client_secret)`
    Basic,
}

/// Configuration for a [`FeedClient`](crate::FeedClient).
///
/// `Debug` is manually implemented to redact `api_key` and `client_secret`.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URI of the feed service; request endpoints are joined onto it.
    pub base_uri: String,

    /// Vendor API key, sent as the `x-api-key` header on every request.
    pub api_key: SecretString,

    /// `OAuth2` token endpoint for the client-credentials exchange.
    pub token_endpoint: Option<Url>,

    /// `OAuth2` client identifier.
    pub client_id: String,

    /// `OAuth2` client secret (redacted in `Debug` output).
    pub client_secret: SecretString,

    /// Requested scopes, space-joined into the `scope` parameter.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Credential transmission method for the token request.
    #[serde(default)]
    pub auth_method: ClientAuthMethod,
}

fn default_scopes() -> Vec<String> {
    vec!["api/read".to_owned()]
}

impl ClientConfig {
    /// Validate that the configuration is self-consistent.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Config`] if `base_uri`, `client_id` or
    /// `client_secret` is empty, or if `token_endpoint` is missing.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.base_uri.trim().is_empty() {
            return Err(TokenError::Config("base_uri must not be empty".into()));
        }
        if self.client_id.trim().is_empty() {
            return Err(TokenError::Config("client_id must not be empty".into()));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(TokenError::Config("client_secret must not be empty".into()));
        }
        if self.token_endpoint.is_none() {
            return Err(TokenError::Config("token_endpoint is required".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: String::new(),
            api_key: SecretString::from(""),
            token_endpoint: None,
            client_id: String::new(),
            client_secret: SecretString::from(""),
            scopes: default_scopes(),
            auth_method: ClientAuthMethod::default(),
        }
    }
}

/// `Debug` redacts secret material to prevent accidental exposure in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_uri", &self.base_uri)
            .field("api_key", &"[REDACTED]")
            .field("token_endpoint", &self.token_endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scopes", &self.scopes)
            .field("auth_method", &self.auth_method)
            .finish()
    }
}

//! `OAuth2` client-credentials token acquisition.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::{ClientAuthMethod, ClientConfig};
use crate::error::TokenError;

/// Pluggable source of bearer tokens for the feed client.
///
/// The client calls [`access_token`](Self::access_token) once per request;
/// implementations that want caching or refresh scheduling do it behind this
/// boundary.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Produce a bearer access token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when the token cannot be obtained.
    async fn access_token(&self) -> Result<String, TokenError>;
}

/// Deserialized `OAuth2` token endpoint response.
///
/// Only the fields the client-credentials flow needs; unknown fields are
/// ignored. Deliberately `Deserialize`-only so access tokens cannot be
/// serialized into logs or error messages.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// Client-credentials exchange against a fixed token endpoint.
///
/// Performs one POST per [`access_token`](Authenticator::access_token) call,
/// with no token caching or reuse; callers that need fewer round trips wrap
/// this in their own caching [`Authenticator`].
pub struct ClientCredentials {
    http: reqwest::Client,
    token_endpoint: Url,
    client_id: String,
    client_secret: SecretString,
    /// Pre-joined scopes (space-separated), or `None` when the list is empty.
    scopes: Option<String>,
    auth_method: ClientAuthMethod,
}

impl ClientCredentials {
    /// Build a token source from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Config`] if `token_endpoint` is missing and
    /// [`TokenError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, TokenError> {
        let token_endpoint = config
            .token_endpoint
            .clone()
            .ok_or_else(|| TokenError::Config("token_endpoint is required".into()))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TokenError::Http(e.to_string()))?;

        let scopes = if config.scopes.is_empty() {
            None
        } else {
            Some(config.scopes.join(" "))
        };

        Ok(Self {
            http,
            token_endpoint,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes,
            auth_method: config.auth_method,
        })
    }
}

#[async_trait]
impl Authenticator for ClientCredentials {
    async fn access_token(&self) -> Result<String, TokenError> {
        // -- form fields ------------------------------------------------------
        let mut fields: Vec<(&str, &str)> = vec![("grant_type", "client_credentials")];

        if let Some(ref scope) = self.scopes {
            fields.push(("scope", scope));
        }

        // For Form auth the credentials travel in the body.
        let secret_expose;
        if self.auth_method == ClientAuthMethod::Form {
            secret_expose = self.client_secret.expose_secret();
            fields.push(("client_id", &self.client_id));
            fields.push(("client_secret", secret_expose));
        }

        // -- request ----------------------------------------------------------
        let mut request = self.http.post(self.token_endpoint.clone()).form(&fields);

        // For Basic auth the credentials travel in the Authorization header.
        if self.auth_method == ClientAuthMethod::Basic {
            let credentials = format!(
                "{}:{}",
                self.client_id,
                self.client_secret.expose_secret()
            );
            let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
            request = request.header("authorization", format!("Basic {encoded}"));
        }

        debug!(endpoint = %self.token_endpoint, "requesting access token");

        let response = request
            .send()
            .await
            .map_err(|e| TokenError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenError::Http(format!(
                "token endpoint returned HTTP {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TokenError::Http(e.to_string()))?;

        let token: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        // -- validate ---------------------------------------------------------
        if let Some(ref token_type) = token.token_type
            && !token_type.eq_ignore_ascii_case("bearer")
        {
            return Err(TokenError::UnsupportedTokenType(token_type.clone()));
        }

        if token.access_token.is_empty() {
            return Err(TokenError::InvalidResponse("empty access_token".into()));
        }

        Ok(token.access_token)
    }
}

//! Authenticated GET execution against the feed service.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::auth::{Authenticator, ClientCredentials};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::response::Document;

/// Maximum number of body characters quoted in `HttpStatus` errors.
const BODY_PREVIEW_LIMIT: usize = 256;

/// Feed service client.
///
/// Each [`get`](Self::get) performs one token acquisition followed by one
/// GET round trip: no token caching, no retry, no timeout tuning beyond the
/// transport defaults. Failures surface immediately as [`ClientError`].
pub struct FeedClient {
    http: reqwest::Client,
    base_uri: String,
    api_key: SecretString,
    authenticator: Arc<dyn Authenticator>,
}

impl FeedClient {
    /// Build a client with the default [`ClientCredentials`] authenticator.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] when the configuration is
    /// invalid and [`ClientError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let authenticator = Arc::new(ClientCredentials::new(config)?);
        Self::with_authenticator(config, authenticator)
    }

    /// Build a client with a custom [`Authenticator`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn with_authenticator(
        config: &ClientConfig,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            base_uri: config.base_uri.clone(),
            api_key: config.api_key.clone(),
            authenticator,
        })
    }

    /// GET `endpoint` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] when no token can be
    /// obtained, [`ClientError::Transport`] on connection failure,
    /// [`ClientError::HttpStatus`] on a non-2xx answer and
    /// [`ClientError::ResponseParse`] when the body is not valid JSON.
    #[instrument(skip(self))]
    pub async fn get(&self, endpoint: &str) -> Result<Document, ClientError> {
        let body = self.get_bytes(endpoint).await?;
        Document::parse(&body)
    }

    /// GET `endpoint` and return the raw body bytes.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get), minus `ResponseParse`.
    pub async fn get_bytes(&self, endpoint: &str) -> Result<Vec<u8>, ClientError> {
        let token = self.authenticator.access_token().await?;
        let url = self.request_url(endpoint);

        debug!(%url, "sending GET");

        let response = self
            .http
            .get(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .bearer_auth(&token)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status,
                body_preview: body_preview(&body),
            });
        }

        debug!(%status, bytes = body.len(), "GET complete");

        Ok(body.to_vec())
    }

    /// Join the endpoint onto the base URI. Absolute `http(s)://` endpoints
    /// pass through verbatim.
    fn request_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_owned();
        }
        let base = self.base_uri.trim_end_matches('/');
        if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut chars = text.chars();
    let preview: String = chars.by_ref().take(BODY_PREVIEW_LIMIT).collect();
    if chars.next().is_some() {
        format!("{preview}…")
    } else {
        preview
    }
}

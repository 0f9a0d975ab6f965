use thiserror::Error;

/// Errors from the `OAuth2` client-credentials token exchange.
///
/// Variants are constructed so that secret material (`client_secret`, access
/// tokens) can never appear in the rendered output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenError {
    /// Token endpoint unreachable or returned a non-2xx status.
    #[error("token request failed: {0}")]
    Http(String),

    /// The token endpoint response was not valid JSON or lacked a usable
    /// `access_token`.
    #[error("invalid token response: {0}")]
    InvalidResponse(String),

    /// The token endpoint returned a `token_type` other than `Bearer`.
    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),

    /// The client configuration is incomplete or inconsistent.
    #[error("OAuth2 config error: {0}")]
    Config(String),
}

/// Errors surfaced by [`FeedClient`](crate::FeedClient).
///
/// All of them propagate immediately. There is no retry and no
/// partial-result mode: either the decoded document is returned, or one of
/// these is.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Obtaining an access token failed.
    #[error("authentication failed: {0}")]
    Authentication(#[from] TokenError),

    /// Transport-level failure on the GET (connection, TLS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body_preview}")]
    HttpStatus {
        status: reqwest::StatusCode,
        /// Truncated response body for diagnostics.
        body_preview: String,
    },

    /// The response body is not valid JSON.
    #[error("response parse failed: {0}")]
    ResponseParse(#[source] serde_json::Error),
}

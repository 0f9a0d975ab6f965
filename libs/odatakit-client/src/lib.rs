#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Authenticated HTTP client for `OData`-style feed APIs.
//!
//! The client performs one `OAuth2` client-credentials token exchange per
//! `get` call (no caching, no retry), attaches the vendor `x-api-key` header
//! and the bearer token, and decodes the JSON response into a [`Document`]
//! for property and entity extraction.
//!
//! URL construction is not this crate's concern: build query URLs with
//! `odatakit-query` and pass the result to [`FeedClient::get`].

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod response;

pub use auth::{Authenticator, ClientCredentials};
pub use client::FeedClient;
pub use config::{ClientAuthMethod, ClientConfig};
pub use error::{ClientError, TokenError};
pub use response::Document;

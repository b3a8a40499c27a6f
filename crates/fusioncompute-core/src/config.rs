//! Configuration structures for FusionCompute clients.
//!
//! This module provides the connection settings for a FusionCompute Virtual
//! Resource Management (VRM) endpoint, including the site the client operates on
//! and the session token used for authentication.

use crate::client::{DEFAULT_ACCEPT_VERSION, DEFAULT_REQUEST_TIMEOUT};
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a FusionCompute client instance.
///
/// The token is never serialized; it is only read when deserializing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FusionComputeConfig {
    /// VRM base URL (e.g. `https://vrm.example.com:7443`)
    #[validate(url)]
    pub server_url: String,

    /// Site URI collection endpoints are rooted at (e.g. `/service/sites/39A107AF`)
    #[validate(length(min = 1))]
    pub site_uri: String,

    /// Session token sent as `X-Auth-Token`
    #[serde(default, skip_serializing, deserialize_with = "deserialize_token")]
    pub token: Option<SecretString>,

    /// API version requested through the `Accept` header
    #[serde(default = "default_accept_version")]
    pub accept_version: String,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_accept_version() -> String {
    DEFAULT_ACCEPT_VERSION.to_string()
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl FusionComputeConfig {
    /// Create a new client configuration with required parameters.
    ///
    /// # Arguments
    ///
    /// * `server_url` - The VRM base URL (e.g., "https://vrm.example.com:7443")
    /// * `site_uri` - The site URI (e.g., "/service/sites/39A107AF")
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(server_url: impl Into<String>, site_uri: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            server_url: server_url.into(),
            site_uri: site_uri.into(),
            token: None,
            accept_version: default_accept_version(),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
        };

        config.validate().map_err(|e| {
            Error::Config(format!("Invalid configuration: {}", e))
        })?;

        Ok(config)
    }

    /// Set the session token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Override the API version sent in the `Accept` header.
    #[must_use]
    pub fn with_accept_version(mut self, version: impl Into<String>) -> Self {
        self.accept_version = version.into();
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: std::path::PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and validate the server URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_server_url(&self) -> Result<Url, Error> {
        Url::parse(&self.server_url)
            .map_err(|e| Error::Config(format!("Invalid server URL: {}", e)))
    }
}

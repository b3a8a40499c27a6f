//! HTTP transport capability and its reqwest-backed implementation.
//!
//! Service crates never talk to reqwest directly. They build an [`ApiRequest`],
//! hand it to an [`HttpTransport`] and decode the returned [`ApiResponse`] with
//! [`crate::response::decode_response`]. Tests substitute their own transport.

use crate::client::{ClientConfig, DEFAULT_ACCEPT_VERSION};
use crate::config::FusionComputeConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;
use validator::Validate;

const USER_AGENT: &str = concat!("fusioncompute-rust/", env!("CARGO_PKG_VERSION"));
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// A single request against the FusionCompute API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the configured server URL.
    pub path: String,
    /// Query string pairs.
    pub query: Vec<(&'static str, String)>,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request without query or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Shorthand for a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Shorthand for a `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Replace the query string pairs.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the body cannot be represented as JSON.
    pub fn with_json<B>(mut self, body: &B) -> Result<Self>
    where
        B: Serialize + ?Sized,
    {
        let value = serde_json::to_value(body).map_err(|err| {
            Error::InvalidInput(format!("Failed to encode request body: {err}"))
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Raw outcome of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Create a response from a status and body.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

}

/// Capability to execute HTTP requests against a FusionCompute endpoint.
///
/// Implementations resolve [`ApiRequest::path`] against their base URL and return
/// the status and body untouched; status interpretation is left to the caller.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a request, failing only when the exchange itself fails.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Builder for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    base_url: Url,
    http_config: ClientConfig,
    token: Option<SecretString>,
    accept_version: String,
    tls_verify: bool,
    tls_ca_cert: Option<PathBuf>,
}

impl ApiClientBuilder {
    /// Create a new builder with the provided server base URL.
    ///
    /// The URL should include the protocol, hostname and port
    /// (e.g. `https://vrm.example.com:7443`).
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(base_url.as_ref()).map_err(|err| {
            Error::Config(format!(
                "Invalid FusionCompute base URL `{}`: {err}",
                base_url.as_ref()
            ))
        })?;

        Ok(Self {
            base_url: url,
            http_config: ClientConfig::new(),
            token: None,
            accept_version: DEFAULT_ACCEPT_VERSION.to_string(),
            tls_verify: true,
            tls_ca_cert: None,
        })
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Configure the session token (sent as `X-Auth-Token`).
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Override the API version sent in the `Accept` header (defaults to `8.0`).
    #[must_use]
    pub fn with_accept_version(mut self, version: impl Into<String>) -> Self {
        self.accept_version = version.into();
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Trust an additional PEM encoded CA certificate.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .user_agent(USER_AGENT)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .connect_timeout(self.http_config.connect_timeout);

        if !self.http_config.enable_compression {
            builder = builder.no_gzip();
        }

        if !self.tls_verify {
            warn!("TLS verification disabled for FusionCompute client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &self.tls_ca_cert {
            debug!("loading FusionCompute CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::Config(format!(
                    "Failed to read CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::Config(format!("Invalid CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder.build().map_err(|err| {
            Error::Config(format!("Failed to build FusionCompute HTTP client: {err}"))
        })?;

        Ok(ApiClient {
            http,
            base_url: self.base_url,
            token: self.token,
            accept: format!(
                "application/json;version={};charset=UTF-8",
                self.accept_version
            ),
            log_requests: self.http_config.enable_logging,
        })
    }
}

/// Asynchronous reqwest-backed [`HttpTransport`].
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<SecretString>,
    accept: String,
    log_requests: bool,
}

impl ApiClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        ApiClientBuilder::new(base_url)?.build()
    }

    /// Start a builder for the given base URL.
    pub fn builder(base_url: impl AsRef<str>) -> Result<ApiClientBuilder> {
        ApiClientBuilder::new(base_url)
    }

    /// Construct a client from a [`FusionComputeConfig`].
    ///
    /// The configuration is validated first, so a deserialized or hand-edited
    /// config with an out-of-range timeout is rejected here.
    pub fn from_config(config: &FusionComputeConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.parse_server_url()?;
        let http_config = ClientConfig::new().with_timeout(config.timeout());

        let mut builder = ApiClientBuilder::new(base_url.as_str())?
            .with_http_config(http_config)
            .with_accept_version(config.accept_version.clone())
            .with_tls_verify(config.tls_verify);

        if let Some(token) = &config.token {
            builder = builder.with_token(token.expose_secret());
        }
        if let Some(ca_cert) = &config.tls_ca_cert {
            builder = builder.with_ca_cert(ca_cert.clone());
        }

        builder.build()
    }

    /// Access the underlying base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let normalized = path.strip_prefix('/').unwrap_or(path);

        self.base_url.join(normalized).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid FusionCompute path `{path}`: {err}"))
        })
    }
}

#[async_trait]
impl HttpTransport for ApiClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.build_url(&request.path)?;
        let mut builder = self.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.header(AUTH_TOKEN_HEADER, token.expose_secret());
        }
        builder = builder.header(ACCEPT, self.accept.as_str());

        if let Some(payload) = &request.body {
            builder = builder.json(payload);
        }

        if self.log_requests {
            info!(method = %request.method, path = %request.path, "FusionCompute request");
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if self.log_requests {
            debug!(
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                "FusionCompute response"
            );
        }

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn builder_rejects_invalid_url() {
        let err = ApiClientBuilder::new("::not a url::").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn builder_rejects_missing_ca_cert() {
        let err = ApiClient::builder("https://vrm.example.com")
            .unwrap()
            .with_ca_cert(PathBuf::from("/nonexistent/ca.pem"))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn request_constructors() {
        let request = ApiRequest::post("/service/sites/1/vms/i-1/action/reboot")
            .with_json(&json!({"mode": "safe"}))
            .unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(json!({"mode": "safe"})));
        assert!(request.query.is_empty());

        let request = ApiRequest::get("/vms").with_query(vec![("isTemplate", "true".into())]);
        assert_eq!(request.query, vec![("isTemplate", "true".to_string())]);
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn execute_sends_headers_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/sites/1/vms"))
            .and(query_param("isTemplate", "true"))
            .and(header("X-Auth-Token", "token-1"))
            .and(header("Accept", "application/json;version=8.0;charset=UTF-8"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::builder(server.uri())
            .unwrap()
            .with_token("token-1")
            .build()
            .unwrap();
        let request = ApiRequest::get("/service/sites/1/vms")
            .with_query(vec![("isTemplate", "true".to_string())]);
        let response = client.execute(request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, b"{}".to_vec());
    }

    #[tokio::test]
    async fn execute_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/service/sites/1/vms/i-1/action/reboot"))
            .and(body_json(json!({"mode": "force"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"taskUrn": "t"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let request = ApiRequest::post("/service/sites/1/vms/i-1/action/reboot")
            .with_json(&json!({"mode": "force"}))
            .unwrap();
        let response = client.execute(request).await.unwrap();
        assert!(response.status.is_success());
    }

    #[tokio::test]
    async fn execute_returns_failure_status_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/service/sites/1/vms/i-1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let response = client
            .execute(ApiRequest::delete("/service/sites/1/vms/i-1"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, b"boom".to_vec());
    }

    #[tokio::test]
    async fn execute_from_config_uses_accept_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/sites/1/vms/i-1"))
            .and(header("Accept", "application/json;version=6.5;charset=UTF-8"))
            .and(header("X-Auth-Token", "cfg-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let config = FusionComputeConfig::new(server.uri(), "/service/sites/1")
            .unwrap()
            .with_token("cfg-token")
            .with_accept_version("6.5");
        let client = ApiClient::from_config(&config).unwrap();
        client
            .execute(ApiRequest::get("/service/sites/1/vms/i-1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn from_config_rejects_zero_timeout() {
        let server = MockServer::start().await;
        let config: FusionComputeConfig = serde_json::from_value(json!({
            "server_url": server.uri(),
            "site_uri": "/service/sites/1",
            "request_timeout_secs": 0
        }))
        .unwrap();

        let err = ApiClient::from_config(&config).err().unwrap();
        assert!(matches!(err, Error::Validation(_)));

        let config = FusionComputeConfig::new(server.uri(), "/service/sites/1")
            .unwrap()
            .with_timeout(0);
        let err = ApiClient::from_config(&config).err().unwrap();
        assert!(matches!(err, Error::Validation(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn execute_connection_refused_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let err = client.execute(ApiRequest::get("/vms")).await.unwrap_err();
        assert!(err.is_transport());
    }
}

//! Tuning for the reqwest client that talks to a VRM endpoint.
//!
//! [`crate::ApiClientBuilder::build`] reads a [`ClientConfig`] when it creates
//! the underlying `reqwest::Client`.

use std::time::Duration;

/// Default timeout for FusionCompute requests in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default timeout for establishing a connection in seconds.
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Seconds an unused VRM connection stays in the pool.
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Idle VRM connections kept open per host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// API version requested through the `Accept` header.
pub const DEFAULT_ACCEPT_VERSION: &str = "8.0";

/// Settings applied to the `reqwest::Client` behind [`crate::ApiClient`].
///
/// Only `timeout` is driven by [`crate::FusionComputeConfig`]; the rest keep
/// their defaults unless a caller passes a config to
/// [`crate::ApiClientBuilder::with_http_config`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound on one VRM exchange, response body included
    pub timeout: Duration,

    /// Upper bound on the TCP and TLS handshake
    pub connect_timeout: Duration,

    /// How long an idle keep-alive connection is retained
    pub pool_idle_timeout: Duration,

    /// Idle keep-alive connections retained per VRM host
    pub pool_max_idle_per_host: usize,

    /// Emit `tracing` events for each request and response
    pub enable_logging: bool,

    /// Ask the VRM for gzip bodies
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Settings built from the `DEFAULT_*` constants.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
            enable_compression: true,
        }
    }

    /// Override the per-exchange timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the handshake timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override how long idle connections are pooled.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Override the idle pool size per VRM host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Toggle per-request `tracing` output.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Toggle gzip response bodies.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

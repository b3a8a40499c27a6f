//! # fusioncompute-core
//!
//! Core types and utilities for working with the FusionCompute REST API.
//!
//! This crate provides the shared error type, client configuration, the HTTP
//! transport capability and the response decoder used by the service crates.
//!
//! ## Modules
//!
//! - [`error`] - Error type shared by all operations
//! - [`config`] - Connection configuration for a VRM endpoint
//! - [`client`] - HTTP tuning (timeouts, pooling, compression)
//! - [`transport`] - The [`HttpTransport`] capability and its reqwest implementation
//! - [`response`] - Uniform success decoding and HTTP error formatting
//! - [`query`] - Query string builder for list endpoints

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod response;
pub mod transport;

// Re-export commonly used types
pub use config::FusionComputeConfig;
pub use error::{Error, Result};
pub use response::{decode_response, format_http_error};
pub use transport::{ApiClient, ApiClientBuilder, ApiRequest, ApiResponse, HttpTransport};

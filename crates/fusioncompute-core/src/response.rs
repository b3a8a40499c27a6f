//! Response decoding shared by every FusionCompute operation.
//!
//! A 2xx status is decoded into the operation's typed result. Every other status
//! goes through [`format_http_error`], so all operations report HTTP failures the
//! same way.

use crate::transport::ApiResponse;
use crate::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error envelope returned by the platform on failure.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Platform error code, e.g. `10300041`.
    #[serde(default)]
    pub error_code: Option<String>,
    /// Human readable error description.
    #[serde(default)]
    pub error_des: Option<String>,
}

/// Decode a completed exchange into `T`, or into the uniform HTTP error.
///
/// `context` names the request (usually its path) in decode error messages.
///
/// # Errors
///
/// Returns [`Error::HttpStatus`] for non-success statuses and [`Error::Decode`]
/// when a success body does not match `T`.
pub fn decode_response<T>(response: ApiResponse, context: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    if !response.status.is_success() {
        return Err(format_http_error(response.status, &response.body));
    }

    serde_json::from_slice(&response.body).map_err(|err| {
        Error::Decode(format!(
            "Failed to parse FusionCompute response for `{context}`: {err}"
        ))
    })
}

/// Build the [`Error::HttpStatus`] for a failed response.
///
/// When the body is the platform's `{"errorCode", "errorDes"}` envelope the code
/// and description are lifted out; otherwise the raw body is the message.
#[must_use]
pub fn format_http_error(status: StatusCode, body: &[u8]) -> Error {
    let text = String::from_utf8_lossy(body).into_owned();
    let envelope = serde_json::from_slice::<ErrorBody>(body).ok();

    let error_code = envelope.as_ref().and_then(|e| e.error_code.clone());
    let description = envelope.and_then(|e| e.error_des);

    let message = match (description, text.trim().is_empty()) {
        (Some(description), _) => description,
        (None, false) => text.clone(),
        (None, true) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    Error::HttpStatus {
        status: status.as_u16(),
        error_code,
        message,
        body: text,
    }
}

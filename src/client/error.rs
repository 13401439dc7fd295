//! Error types of the flag API consumer.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`GatewayError`] failures.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures that can occur while talking to the flag API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build flag API client")]
    ClientBuilder {
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent.
    #[error("failed to send flag API request to `{path}`")]
    RequestSend {
        /// Path relative to the API base URL.
        path: String,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    #[error("unexpected flag API response status {status} for `{path}`")]
    RequestStatus {
        /// Path relative to the API base URL.
        path: String,
        /// Status returned by the API.
        status: StatusCode,
    },
    /// Response payload did not have the expected shape.
    #[error("failed to decode flag API response for `{path}`")]
    DecodeResponse {
        /// Path relative to the API base URL.
        path: String,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
}

/// A page could not be composed.
#[derive(Debug, Error)]
pub enum PageError {
    /// Flags are required to render and could not be fetched.
    #[error("feature flags are unavailable")]
    FlagsUnavailable(#[source] GatewayError),
}

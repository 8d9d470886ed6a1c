use thiserror::Error;

use crate::client::RequestDetails;

/// Result type alias for VictorOps API operations
pub type Result<T> = std::result::Result<T, VictorOpsError>;

/// Errors that can occur when talking to the VictorOps public API
#[derive(Debug, Error)]
pub enum VictorOpsError {
    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// The endpoint could not be joined onto the base URL
    #[error("Failed to build request URL: {0}")]
    Url(#[source] url::ParseError),

    /// Failed to assemble the outgoing request
    #[error("Failed to build request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    /// HTTP request failed (DNS, connect, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// Failed to read the response body
    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// Failed to serialize the request body
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body was not valid JSON for the expected shape
    #[error("Failed to decode API response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Envelope for the call that produced the undecodable body
        details: Box<RequestDetails>,
    },
}

impl VictorOpsError {
    /// Check if the error was caused by the configured timeout expiring
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(err)) => err.is_timeout(),
            Self::Request(reqwest_middleware::Error::Middleware(err)) => err
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout),
            Self::ReadBody(err) => err.is_timeout(),
            _ => false,
        }
    }

    /// Check if the error is a response-decode failure
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// The request/response envelope attached to the error, if any
    ///
    /// Only decode failures carry an envelope: the call itself completed,
    /// so the raw body and status are available for diagnostics.
    pub fn details(&self) -> Option<&RequestDetails> {
        match self {
            Self::Decode { details, .. } => Some(details),
            _ => None,
        }
    }
}

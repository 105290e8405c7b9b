//! Normalized failure kinds for all remote calls.

use thiserror::Error;

/// Every transport failure is folded into one of these kinds before it
/// leaves the API layer. A transport-level failure with no response at all
/// is reported as `RequestFailed` carrying the underlying error text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered 401, regardless of response body.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx response, or a request that never got a response.
    #[error("API error: {0}")]
    RequestFailed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::RequestFailed(err.to_string())
    }
}

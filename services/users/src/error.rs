//! Custom error types for the users service

use thiserror::Error;

use crate::event::ProxyResponse;
use crate::response::error_response;

/// Custom error type for the users service
///
/// Messages are returned to the caller verbatim, so `Internal` must only
/// ever carry a generic message.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Unroutable request or missing fields
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No row matched the lookup key
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database unreachable or statement failed
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => msg,
        }
    }
}

impl From<ApiError> for ProxyResponse {
    fn from(error: ApiError) -> Self {
        error_response(error.status_code(), error.message())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_into_response() {
        let response: ProxyResponse = ApiError::NotFound("User not found.".to_string()).into();
        assert_eq!(response.status_code, 404);
        assert_eq!(response.json().unwrap(), json!({"error": "User not found."}));

        let response: ProxyResponse = ApiError::Internal("boom".to_string()).into();
        assert_eq!(response.status_code, 500);
    }
}

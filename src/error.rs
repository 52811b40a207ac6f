//! Error types for the Binance client library.

use thiserror::Error;

/// The main error type for all Binance client operations.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Binance API returned an error
    #[error("Binance API error: {0}")]
    Api(ApiError),

    /// Non-success HTTP status with a body that is not a structured API error
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code
        status: reqwest::StatusCode,
        /// The raw response body
        body: String,
    },

    /// Rate limit exceeded (HTTP 429) or IP ban in effect (HTTP 418)
    #[error("Rate limit exceeded, retry after {retry_after_ms:?}ms")]
    RateLimitExceeded {
        /// Suggested wait time in milliseconds before retrying
        retry_after_ms: Option<u64>,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid request parameters (e.g. startTime set without endTime)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Request was cancelled by the caller before completing
    #[error("Request cancelled")]
    Cancelled,

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

/// Binance API error codes and messages.
///
/// These are errors returned by the Binance API itself in the response body,
/// as `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The numeric error code from Binance (e.g., -1021)
    pub code: i64,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Check if this is a timestamp-outside-recvWindow error.
    ///
    /// Binance rejects signed requests whose timestamp is ahead of the server
    /// time or older than `recvWindow`; syncing the local clock usually fixes it.
    pub fn is_invalid_timestamp(&self) -> bool {
        self.code == error_codes::INVALID_TIMESTAMP
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == error_codes::INVALID_SIGNATURE
    }

    /// Check if this is an invalid or revoked API key error.
    pub fn is_invalid_api_key(&self) -> bool {
        self.code == error_codes::BAD_API_KEY_FORMAT || self.code == error_codes::REJECTED_API_KEY
    }

    /// Check if this is a request-weight rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.code == error_codes::TOO_MANY_REQUESTS
    }

    /// Check if this is a missing/malformed mandatory parameter error.
    pub fn is_mandatory_param(&self) -> bool {
        self.code == error_codes::MANDATORY_PARAM_EMPTY_OR_MALFORMED
    }
}

/// Known Binance error codes for pattern matching.
pub mod error_codes {
    /// Unknown server error.
    pub const UNKNOWN: i64 = -1000;
    /// Not authorized to execute this request.
    pub const UNAUTHORIZED: i64 = -1002;
    /// Too many requests queued or request weight exceeded.
    pub const TOO_MANY_REQUESTS: i64 = -1003;
    /// Timestamp outside of recvWindow.
    pub const INVALID_TIMESTAMP: i64 = -1021;
    /// Signature for this request is not valid.
    pub const INVALID_SIGNATURE: i64 = -1022;
    /// Illegal characters found in a parameter.
    pub const ILLEGAL_CHARS: i64 = -1100;
    /// A mandatory parameter was not sent, was empty/null, or malformed.
    pub const MANDATORY_PARAM_EMPTY_OR_MALFORMED: i64 = -1102;
    /// API key format invalid.
    pub const BAD_API_KEY_FORMAT: i64 = -2014;
    /// Invalid API key, IP, or permissions for action.
    pub const REJECTED_API_KEY: i64 = -2015;
}

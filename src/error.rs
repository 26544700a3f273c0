//! Error types for the deed archive pipeline.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to a remote HTTP service
/// (the language model API or the search cluster).
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised while turning a deed image into an extraction result.
///
/// A response that cannot be parsed is not an error; see
/// [`ExtractionOutcome`](crate::models::ExtractionOutcome).
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The image could not be decoded or re-encoded
    #[error("Image processing failed for {path}: {reason}")]
    Image { path: String, reason: String },

    /// Reading the image failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The model API call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors that can occur while processing and storing extraction output.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the record failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The image file name does not yield a usable document id
    #[error("Invalid document id: {0}")]
    InvalidId(#[from] ValidationError),

    /// The extractor failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Errors that can occur while loading the CSV dataset into the index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The CSV could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The search cluster rejected a request
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),

    /// Search execution failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Convenience type alias for Results with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ExtractionError
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with IndexError
pub type IndexResult<T> = Result<T, IndexError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;

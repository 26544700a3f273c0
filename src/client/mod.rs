//! HTTP clients for the two remote services the pipeline depends on.
//!
//! Both clients are synchronous and built on `ureq`: every pipeline stage is a
//! blocking, one-request-at-a-time loop. The MCP server reaches the search
//! client through [`AsyncSearchClient`], which moves calls onto tokio's
//! blocking pool.

mod anthropic;
mod async_wrapper;
mod elastic;

pub use anthropic::{
    AnthropicClient, ContentBlock, ImageSource, Message, MessagesRequest, MessagesResponse,
    ResponseBlock, ANTHROPIC_VERSION,
};
pub use async_wrapper::{AsyncSearchClient, AsyncSearchClientImpl};
pub use elastic::ElasticClient;

use crate::error::ApiError;
use std::time::Duration;

/// Build a `ureq` agent with the given request timeout.
fn build_agent(timeout_secs: u64) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Join a base URL and a path with exactly one slash between them.
fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Map a ureq error to an ApiError.
fn map_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 | 403 => ApiError::Unauthorized,
                404 => ApiError::NotFound(message),
                429 => ApiError::RateLimitExceeded,
                _ => ApiError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => match transport.kind() {
            ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::Dns => {
                ApiError::HttpError(format!("Connection failed: {}", transport))
            }
            ureq::ErrorKind::Io => ApiError::Timeout,
            _ => ApiError::HttpError(transport.to_string()),
        },
    }
}

/// Read a response body as a string.
fn read_body(response: ureq::Response) -> Result<String, ApiError> {
    response
        .into_string()
        .map_err(|e| ApiError::HttpError(e.to_string()))
}

//! Client for the Anthropic Messages API.

use super::{build_agent, join_url, map_error, read_body};
use crate::config::Config;
use crate::error::{ApiError, ApiResult, ConfigResult};
use crate::metrics::{HttpTimer, Metrics};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API version header value sent with every request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Request body for `POST /v1/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

/// A content block in a user message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Image { source: ImageSource },
    Text { text: String },
}

/// Inline base64 image payload.
#[derive(Debug, Clone, Serialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub media_type: String,
    pub data: String,
}

impl ImageSource {
    pub fn base64_png(data: impl Into<String>) -> Self {
        Self {
            kind: "base64".to_string(),
            media_type: "image/png".to_string(),
            data: data.into(),
        }
    }
}

/// Response body of `POST /v1/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,

    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// A content block in the model's reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBlock {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first `text` block, or an empty string when there is none.
    pub fn first_text(&self) -> String {
        self.content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.clone())
            .unwrap_or_default()
    }
}

/// HTTP client for the Anthropic Messages API.
///
/// A fresh client is built per extraction run; nothing is pooled across runs.
#[derive(Clone)]
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    agent: Arc<ureq::Agent>,
    metrics: Metrics,
}

impl AnthropicClient {
    /// Create a client from configuration. Fails when no API key is set.
    pub fn new(config: &Config, metrics: Metrics) -> ConfigResult<Self> {
        Ok(Self {
            base_url: config.anthropic_api_url.clone(),
            api_key: config.anthropic_api_key()?.to_string(),
            model: config.extraction_model.clone(),
            max_tokens: config.extraction_max_tokens,
            agent: Arc::new(build_agent(config.request_timeout)),
            metrics,
        })
    }

    /// Create a client against a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String, model: String) -> Self {
        Self {
            base_url,
            api_key,
            model,
            max_tokens: 1500,
            agent: Arc::new(build_agent(10)),
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a Messages API request.
    pub fn create_message(&self, request: &MessagesRequest) -> ApiResult<MessagesResponse> {
        let url = join_url(&self.base_url, "/v1/messages");
        tracing::debug!("POST {} (model: {})", url, request.model);

        let timer = HttpTimer::new(self.metrics.clone());
        let result = self
            .agent
            .post(&url)
            .set("x-api-key", &self.api_key)
            .set("anthropic-version", ANTHROPIC_VERSION)
            .set("content-type", "application/json")
            .send_json(request)
            .map_err(map_error);
        timer.finish(result.is_err());

        let response = result.map_err(|e| {
            tracing::error!("POST {} - Error: {}", url, e);
            e
        })?;

        let body = read_body(response)?;
        serde_json::from_str(&body).map_err(ApiError::JsonError)
    }

    /// Ask the model about one PNG image and return its free-text reply.
    ///
    /// The reply is returned unparsed; JSON extraction happens in
    /// [`crate::extraction::parse_response`].
    pub fn analyze_image(&self, png_base64: &str, system: &str, prompt: &str) -> ApiResult<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: 0.0,
            system: Some(system.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource::base64_png(png_base64),
                    },
                    ContentBlock::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        };

        let response = self.create_message(&request)?;
        if response.stop_reason.as_deref() == Some("max_tokens") {
            tracing::warn!("Model reply was truncated at {} tokens", self.max_tokens);
        }
        Ok(response.first_text())
    }
}

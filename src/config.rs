//! Configuration management for the deed archive.
//!
//! Settings come from environment variables, with a `.env` file loaded first if
//! present. Credentials are optional at load time and only demanded by the
//! operation that needs them, so comparing transcripts works without any keys.

use crate::error::{ConfigError, ConfigResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::env;
use std::path::PathBuf;

/// Configuration for the deed archive pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API base URL
    pub anthropic_api_url: String,

    /// Anthropic API key (required for extraction)
    pub anthropic_api_key: Option<String>,

    /// Vision model used for extraction
    pub extraction_model: String,

    /// Maximum tokens in the model response (default: 1500)
    pub extraction_max_tokens: u32,

    /// Explicit Elasticsearch URL; takes precedence over `cloud_id`
    pub elastic_url: Option<String>,

    /// Elastic Cloud deployment id
    pub cloud_id: Option<String>,

    /// Elasticsearch API key (required for indexing and search)
    pub elastic_api_key: Option<String>,

    /// Name of the deed index (default: "land_deeds")
    pub index_name: String,

    /// Directory receiving one JSON file per extracted document
    pub output_dir: PathBuf,

    /// Directory holding the `<document_id>.TIF` scans shown with search hits
    pub image_dir: PathBuf,

    /// Maximum number of hits requested per search (default: 10000)
    pub max_search_hits: usize,

    /// HTTP request timeout in seconds (default: 120)
    pub request_timeout: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ANTHROPIC_API_KEY`, `ANTHROPIC_API_URL`, `EXTRACTION_MODEL`, `EXTRACTION_MAX_TOKENS`
    /// - `CLOUD_ID`, `ELASTIC_URL`, `ELASTIC_API_KEY`, `INDEX_NAME`
    /// - `OUTPUT_DIR`, `IMAGE_DIR`, `MAX_SEARCH_HITS`, `REQUEST_TIMEOUT`, `LOG_LEVEL`
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy never writes to stdout, which the MCP transport owns
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let anthropic_api_url =
            env::var("ANTHROPIC_API_URL").unwrap_or(defaults.anthropic_api_url);
        Self::validate_url("ANTHROPIC_API_URL", &anthropic_api_url)?;

        let elastic_url = env::var("ELASTIC_URL").ok();
        if let Some(url) = &elastic_url {
            Self::validate_url("ELASTIC_URL", url)?;
        }

        let anthropic_api_key = Self::optional_secret("ANTHROPIC_API_KEY")?;
        let elastic_api_key = Self::optional_secret("ELASTIC_API_KEY")?;
        let cloud_id = env::var("CLOUD_ID").ok().filter(|v| !v.trim().is_empty());

        let extraction_model = env::var("EXTRACTION_MODEL").unwrap_or(defaults.extraction_model);
        let extraction_max_tokens =
            Self::parse_env_u32("EXTRACTION_MAX_TOKENS", defaults.extraction_max_tokens)?;
        let index_name = env::var("INDEX_NAME").unwrap_or(defaults.index_name);
        let output_dir = env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let image_dir = env::var("IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.image_dir);
        let max_search_hits = Self::parse_env_usize("MAX_SEARCH_HITS", defaults.max_search_hits)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", defaults.request_timeout)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            anthropic_api_url,
            anthropic_api_key,
            extraction_model,
            extraction_max_tokens,
            elastic_url,
            cloud_id,
            elastic_api_key,
            index_name,
            output_dir,
            image_dir,
            max_search_hits,
            request_timeout,
            log_level,
        })
    }

    /// The Anthropic API key, required for extraction.
    pub fn anthropic_api_key(&self) -> ConfigResult<&str> {
        self.anthropic_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("ANTHROPIC_API_KEY".to_string()))
    }

    /// The Elasticsearch API key, required for indexing and search.
    pub fn elastic_api_key(&self) -> ConfigResult<&str> {
        self.elastic_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("ELASTIC_API_KEY".to_string()))
    }

    /// Resolve the cluster URL from `ELASTIC_URL` or, failing that, `CLOUD_ID`.
    pub fn elasticsearch_url(&self) -> ConfigResult<String> {
        if let Some(url) = &self.elastic_url {
            return Ok(url.clone());
        }
        match &self.cloud_id {
            Some(cloud_id) => decode_cloud_id(cloud_id),
            None => Err(ConfigError::MissingVar("CLOUD_ID".to_string())),
        }
    }

    fn validate_url(var: &str, url: &str) -> ConfigResult<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    /// Read a secret that may be absent but must not be blank when set.
    fn optional_secret(var_name: &str) -> ConfigResult<Option<String>> {
        match env::var(var_name) {
            Ok(val) if val.trim().is_empty() => Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            }),
            Ok(val) => Ok(Some(val)),
            Err(_) => Ok(None),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_url: "https://api.anthropic.com".to_string(),
            anthropic_api_key: None,
            extraction_model: "claude-3-7-sonnet-20250219".to_string(),
            extraction_max_tokens: 1500,
            elastic_url: None,
            cloud_id: None,
            elastic_api_key: None,
            index_name: "land_deeds".to_string(),
            output_dir: PathBuf::from("output"),
            image_dir: PathBuf::from("1"),
            max_search_hits: 10_000,
            request_timeout: 120,
            log_level: "info".to_string(),
        }
    }
}

/// Decode an Elastic Cloud id into the cluster URL.
///
/// A cloud id is `<name>:<base64("<host>$<es_uuid>$<kibana_uuid>")>`. The
/// cluster lives at `https://<es_uuid>.<host>`; a `:port` on the host moves to
/// the end of the URL.
pub fn decode_cloud_id(cloud_id: &str) -> ConfigResult<String> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        var: "CLOUD_ID".to_string(),
        reason: reason.to_string(),
    };

    let encoded = cloud_id
        .split_once(':')
        .map(|(_, encoded)| encoded)
        .unwrap_or(cloud_id);

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| invalid("Not valid base64"))?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid("Not valid UTF-8"))?;

    let mut parts = decoded.split('$');
    let host = parts.next().unwrap_or_default();
    let es_uuid = parts.next().unwrap_or_default();
    if host.is_empty() || es_uuid.is_empty() {
        return Err(invalid("Expected <host>$<es_uuid>[$<kibana_uuid>]"));
    }

    Ok(match host.split_once(':') {
        Some((domain, port)) => format!("https://{}.{}:{}", es_uuid, domain, port),
        None => format!("https://{}.{}", es_uuid, host),
    })
}

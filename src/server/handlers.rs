//! MCP tool handlers for the deed archive.
//!
//! This module implements the MCP tools using the rmcp SDK's tool_router pattern.

use crate::domain::DocumentId;
use crate::matching::compare_transcripts;
use crate::models::DeedHit;
use crate::repositories::ExtractionStore;
use crate::search::image_path;
use crate::services::{SearchParams, SearchService};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

/// MCP server exposing deed search, stored extractions and transcript comparison.
#[derive(Clone)]
pub struct DeedArchiveServer {
    search_service: Arc<dyn SearchService>,
    store: Arc<ExtractionStore>,
    image_dir: PathBuf,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for DeedArchiveServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "deed-archive".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Search transcribed colonial land deeds, read stored extraction records, and compare two transcripts of the same deed.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DocumentIdParams {
    document_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CompareTranscriptsParams {
    first: String,
    second: String,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

#[tool_router]
impl DeedArchiveServer {
    pub fn new(
        search_service: Arc<dyn SearchService>,
        store: Arc<ExtractionStore>,
        image_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            search_service,
            store,
            image_dir: image_dir.into(),
            tool_router: Self::tool_router(),
        }
    }

    fn hit_json(&self, hit: &DeedHit) -> serde_json::Value {
        let id = hit.document_id();
        serde_json::json!({
            "document_id": id,
            "score": hit.score,
            "image": image_path(&self.image_dir, id),
            "fields": hit.source,
        })
    }

    /// Search the deed index.
    #[tool(
        description = "Search indexed land deeds. Optional term (empty matches all), field (Full Text, Grantors, Grantees, Document Type, City, County, Execution Date, Recording Date), mode (exact or fuzzy), and start_date/end_date (YYYY-MM-DD) range."
    )]
    async fn search_deeds(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let spec = params.to_query_spec().map_err(invalid_params)?;

        let hits = self
            .search_service
            .search(&spec)
            .await
            .map_err(|e| {
                tracing::error!("Search failed: {}", e);
                to_mcp_error(e)
            })?;

        let response = serde_json::json!({
            "term": spec.term,
            "field": spec.field.display_name(),
            "mode": spec.mode.to_string(),
            "result_count": hits.len(),
            "results": hits.iter().map(|hit| self.hit_json(hit)).collect::<Vec<_>>(),
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response).map_err(to_mcp_error)?,
        )]))
    }

    /// Return the stored extraction record for a document.
    #[tool(
        description = "Get the stored extraction record for a document id. Records with an \"error\" key hold the raw model response that could not be parsed."
    )]
    async fn get_extraction(
        &self,
        params: Parameters<DocumentIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = DocumentId::new(params.0.document_id).map_err(invalid_params)?;

        let outcome = self
            .store
            .load(&id)
            .map_err(to_mcp_error)?
            .ok_or_else(|| invalid_params(format!("No extraction stored for {}", id)))?;

        let json_response = serde_json::to_string_pretty(&outcome).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Compare two transcripts word by word.
    #[tool(
        description = "Compare two transcripts of the same deed: matching word count, percentage of the first transcript's words matched, and the words unique to each side"
    )]
    async fn compare_transcripts(
        &self,
        params: Parameters<CompareTranscriptsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let result = compare_transcripts(&params.first, &params.second);

        let json_response = serde_json::to_string_pretty(&serde_json::json!({
            "matching_count": result.matching_count,
            "matching_percentage": (result.matching_percentage * 100.0).round() / 100.0,
            "non_matching_first": result.non_matching_first,
            "non_matching_second": result.non_matching_second,
            "summary": result.to_string(),
        }))
        .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }
}

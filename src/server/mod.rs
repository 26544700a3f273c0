//! MCP server for the deed archive.
//!
//! Exposes search, stored extractions and transcript comparison to AI
//! assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::DeedArchiveServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server over stdio until the client disconnects.
pub async fn run_server(server: DeedArchiveServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

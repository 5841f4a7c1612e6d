//! MCP tool server.
//!
//! Exposes site search and item listing as the `search_sites` and
//! `list_items` tools over the Streamable HTTP transport, nested at `/mcp`.
//! Graph failures are reported in-band as error results carrying a
//! `{"success": false, "code", "error"}` payload.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use sharepoint_graph::GraphClient;
use tracing::{debug, warn};

pub const SERVER_NAME: &str = "sharepoint-mcp";

const INSTRUCTIONS: &str =
    "Read-only SharePoint access: search sites, then list a site's items by site ID.";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchSitesRequest {
    /// Search term (wildcard = *)
    pub query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListItemsRequest {
    /// SharePoint site ID
    pub site_id: String,
    /// Properties to expand (default: fields)
    #[serde(default)]
    pub expand: Option<String>,
}

/// MCP server backed by the shared Graph client. One instance per session.
#[derive(Clone)]
pub struct SharePointTools {
    graph: Arc<GraphClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SharePointTools {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self {
            graph,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Search for SharePoint sites by name (SharePoint & Teams sites)")]
    async fn search_sites(
        &self,
        Parameters(request): Parameters<SearchSitesRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool search_sites: {:?}", request.query);
        Ok(tool_result(self.graph.search_sites(&request.query).await))
    }

    #[tool(
        description = "List items of a SharePoint site (including list entries, calendars, etc.)"
    )]
    async fn list_items(
        &self,
        Parameters(request): Parameters<ListItemsRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool list_items: {}", request.site_id);
        Ok(tool_result(
            self.graph
                .list_items(&request.site_id, request.expand.as_deref())
                .await,
        ))
    }
}

#[tool_handler]
impl ServerHandler for SharePointTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

fn tool_result(outcome: sharepoint_graph::Result<Vec<Value>>) -> CallToolResult {
    match outcome {
        Ok(items) => CallToolResult::success(vec![Content::text(Value::Array(items).to_string())]),
        Err(e) => {
            warn!("Tool call failed: {}", e);
            let payload = json!({
                "success": false,
                "code": e.code(),
                "error": e.to_string(),
            });
            CallToolResult::error(vec![Content::text(payload.to_string())])
        }
    }
}

/// Streamable HTTP service to nest at `/mcp`.
pub fn service(
    graph: Arc<GraphClient>,
) -> StreamableHttpService<SharePointTools, LocalSessionManager> {
    StreamableHttpService::new(
        move || Ok(SharePointTools::new(graph.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    )
}

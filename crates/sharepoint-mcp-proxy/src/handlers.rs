//! HTTP handlers and router.
//!
//! Implements:
//! - GET /sites?q= - Search sites
//! - GET /site/{site_id}/items?expand= - List a site's items
//! - GET /openapi.json - OpenAPI 3.0.3 document
//! - /mcp - MCP Streamable HTTP endpoint
//! - GET /health - Health check endpoint

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sharepoint_graph::GraphClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Surface;
use crate::error::Result;
use crate::mcp;
use crate::openapi;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<GraphClient>,
    pub surface: Surface,
}

impl AppState {
    pub fn new(graph: Arc<GraphClient>, surface: Surface) -> Self {
        Self { graph, surface }
    }
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    pub surface: String,
}

/// GET /health - Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        surface: state.surface.to_string(),
    })
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default = "wildcard")]
    pub q: String,
}

fn wildcard() -> String {
    "*".to_string()
}

/// GET /sites?q= - Search sites by name.
pub async fn search_sites_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Value>>> {
    info!("Searching sites for {:?}", params.q);
    let sites = state.graph.search_sites(&params.q).await?;
    Ok(Json(sites))
}

#[derive(Deserialize)]
pub struct ItemsParams {
    pub expand: Option<String>,
}

/// GET /site/{site_id}/items?expand= - List items of a site.
pub async fn list_items_handler(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
    Query(params): Query<ItemsParams>,
) -> Result<Json<Vec<Value>>> {
    info!("Listing items of site {}", site_id);
    let items = state
        .graph
        .list_items(&site_id, params.expand.as_deref())
        .await?;
    Ok(Json(items))
}

/// GET /openapi.json
pub async fn openapi_handler() -> Json<Value> {
    Json(openapi::document())
}

/// Build the router for the configured surface.
pub fn router(state: AppState) -> Router {
    let mut app: Router<AppState> = Router::new().route("/health", get(health_handler));

    if state.surface.serves_rest() {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any);

        let rest = Router::new()
            .route("/sites", get(search_sites_handler))
            .route("/site/{site_id}/items", get(list_items_handler))
            .route("/openapi.json", get(openapi_handler))
            .layer(cors);

        app = app.merge(rest);
    }

    if state.surface.serves_mcp() {
        app = app.nest_service("/mcp", mcp::service(state.graph.clone()));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

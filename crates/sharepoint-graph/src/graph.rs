//! Read-only Microsoft Graph operations.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::TokenCache;
use crate::error::{GraphError, Result};

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// `expand` used when listing items without an explicit value.
pub const DEFAULT_EXPAND: &str = "fields";

/// Per-request timeout applied to every Graph call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Forwards site search and item listing to the Graph API.
pub struct GraphClient {
    http: Client,
    base_url: Url,
    tokens: Arc<TokenCache>,
    timeout: Duration,
}

impl GraphClient {
    pub fn new(base_url: &str, tokens: Arc<TokenCache>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GraphError::Config(format!("invalid Graph base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GraphError::Config(format!(
                "Graph base URL {base_url} cannot have path segments"
            )));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            tokens,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `GET /sites?search={query}`; `*` lists every site.
    pub async fn search_sites(&self, query: &str) -> Result<Vec<Value>> {
        let url = self.endpoint(&["sites"]);
        self.get_values(url, &[("search", query)]).await
    }

    /// `GET /sites/{site_id}/items?expand={expand}`
    pub async fn list_items(&self, site_id: &str, expand: Option<&str>) -> Result<Vec<Value>> {
        let expand = expand.unwrap_or(DEFAULT_EXPAND);
        let url = self.endpoint(&["sites", site_id, "items"]);
        self.get_values(url, &[("expand", expand)]).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in new(): the base URL always accepts path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_values(&self, url: Url, query: &[(&str, &str)]) -> Result<Vec<Value>> {
        let token = self.tokens.get_valid_token().await?;

        debug!("GET {} {:?}", url, query);
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("Graph API returned {}", status);
            return Err(GraphError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        extract_value(&body)
    }
}

fn transport_error(e: reqwest::Error) -> GraphError {
    GraphError::Transport {
        timed_out: e.is_timeout(),
        message: e.to_string(),
    }
}

/// Pull the `value` array out of a Graph collection response.
fn extract_value(body: &str) -> Result<Vec<Value>> {
    let mut parsed: Value =
        serde_json::from_str(body).map_err(|e| GraphError::Parse(e.to_string()))?;

    match parsed.get_mut("value").map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(GraphError::Parse("`value` is not an array".to_string())),
        None => Err(GraphError::Parse("response has no `value` field".to_string())),
    }
}

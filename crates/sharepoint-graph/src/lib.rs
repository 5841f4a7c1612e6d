//! Token cache and Microsoft Graph client for the SharePoint MCP proxy.
//!
//! This crate holds everything the proxy does besides HTTP routing:
//! - `Credentials`: client-credentials configuration read once at startup
//! - `TokenCache`: single-slot access-token cache with early refresh
//! - `TokenAcquirer`: identity provider seam, `ClientCredentialsAcquirer` in production
//! - `GraphClient`: the two read-only Graph operations (site search, item listing)

mod acquirer;
mod cache;
mod credentials;
mod error;
mod graph;
mod token;

#[cfg(test)]
mod testing;

pub use acquirer::{ClientCredentialsAcquirer, TokenAcquirer, DEFAULT_AUTHORITY_HOST, GRAPH_SCOPE};
pub use cache::TokenCache;
pub use credentials::Credentials;
pub use error::{GraphError, Result};
pub use graph::{GraphClient, DEFAULT_EXPAND, DEFAULT_GRAPH_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use token::{decide, AcquiredToken, CachedToken, TokenAction, TokenResponse, REFRESH_MARGIN_SECS};

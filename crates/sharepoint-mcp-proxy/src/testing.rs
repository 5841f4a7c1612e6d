//! Fixtures shared by the unit tests in this crate.

use std::sync::Arc;

use sharepoint_graph::{CachedToken, ClientCredentialsAcquirer, Credentials, GraphClient, TokenCache};

/// Graph client whose token slot is pre-filled, so the identity provider is never contacted.
pub fn seeded_graph(graph_base_url: &str) -> Arc<GraphClient> {
    let credentials = Credentials::new(
        Some("tenant".to_string()),
        Some("client".to_string()),
        Some("secret".to_string()),
    )
    .unwrap();
    let acquirer = Arc::new(ClientCredentialsAcquirer::new(credentials, "http://127.0.0.1:9"));
    let cache = Arc::new(TokenCache::with_state(
        acquirer,
        CachedToken {
            value: Some("test-token".to_string()),
            expires_at: i64::MAX / 2,
        },
    ));
    Arc::new(GraphClient::new(graph_base_url, cache).unwrap())
}

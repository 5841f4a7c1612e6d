//! Single-slot access-token cache.
//!
//! The slot is read, and if the token is missing or within
//! `REFRESH_MARGIN_SECS` of expiry a new one is acquired and written back.
//! The lock is never held across the acquisition, so concurrent misses may
//! each acquire a token; the last write wins.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::acquirer::TokenAcquirer;
use crate::error::{GraphError, Result};
use crate::token::{decide, CachedToken, TokenAction};

pub struct TokenCache {
    acquirer: Arc<dyn TokenAcquirer>,
    slot: RwLock<CachedToken>,
}

impl TokenCache {
    /// Create an empty cache.
    pub fn new(acquirer: Arc<dyn TokenAcquirer>) -> Self {
        Self::with_state(acquirer, CachedToken::default())
    }

    /// Create a cache whose slot starts with `state`.
    pub fn with_state(acquirer: Arc<dyn TokenAcquirer>, state: CachedToken) -> Self {
        Self {
            acquirer,
            slot: RwLock::new(state),
        }
    }

    /// Current slot contents.
    pub async fn snapshot(&self) -> CachedToken {
        self.slot.read().await.clone()
    }

    /// Return a token valid for at least the refresh margin, acquiring one if needed.
    pub async fn get_valid_token(&self) -> Result<String> {
        let action = {
            let slot = self.slot.read().await;
            decide(&slot, Utc::now().timestamp())
        };

        match action {
            TokenAction::UseCached(value) => {
                debug!("Using cached Graph access token");
                Ok(value)
            }
            TokenAction::Refresh => {
                let acquired = self.acquirer.acquire().await.map_err(|e| {
                    warn!("Token acquisition failed: {}", e);
                    e
                })?;

                let expires_at = Utc::now()
                    .timestamp()
                    .checked_add(acquired.expires_in)
                    .ok_or_else(|| {
                        warn!("Token lifetime {}s overflows the clock", acquired.expires_in);
                        GraphError::Auth(format!(
                            "token expires_in {} is out of range",
                            acquired.expires_in
                        ))
                    })?;
                {
                    let mut slot = self.slot.write().await;
                    slot.value = Some(acquired.access_token.clone());
                    slot.expires_at = expires_at;
                }

                info!("Acquired Graph access token (expires at {})", expires_at);
                Ok(acquired.access_token)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingAcquirer;
    use crate::token::REFRESH_MARGIN_SECS;

    fn now() -> i64 {
        Utc::now().timestamp()
    }

    #[tokio::test]
    async fn test_fresh_token_is_reused_without_acquisition() {
        let acquirer = CountingAcquirer::issuing("new-token", 3600);
        let cache = TokenCache::with_state(
            acquirer.clone(),
            CachedToken {
                value: Some("cached-token".to_string()),
                expires_at: now() + 3000,
            },
        );

        assert_eq!(cache.get_valid_token().await.unwrap(), "cached-token");
        assert_eq!(cache.get_valid_token().await.unwrap(), "cached-token");
        assert_eq!(acquirer.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_cache_acquires_once_then_reuses() {
        let acquirer = CountingAcquirer::issuing("new-token", 3600);
        let cache = TokenCache::new(acquirer.clone());

        let before = now();
        assert_eq!(cache.get_valid_token().await.unwrap(), "new-token");
        assert_eq!(cache.get_valid_token().await.unwrap(), "new-token");
        assert_eq!(acquirer.calls(), 1);

        let state = cache.snapshot().await;
        assert_eq!(state.value.as_deref(), Some("new-token"));
        assert!(state.expires_at >= before + 3600);
        assert!(state.expires_at <= now() + 3600);
    }

    #[tokio::test]
    async fn test_token_inside_margin_is_refreshed() {
        let acquirer = CountingAcquirer::issuing("new-token", 3600);
        let cache = TokenCache::with_state(
            acquirer.clone(),
            CachedToken {
                value: Some("old-token".to_string()),
                expires_at: now() + REFRESH_MARGIN_SECS,
            },
        );

        assert_eq!(cache.get_valid_token().await.unwrap(), "new-token");
        assert_eq!(acquirer.calls(), 1);

        let state = cache.snapshot().await;
        assert_eq!(state.value.as_deref(), Some("new-token"));
        assert!(state.expires_at > now() + REFRESH_MARGIN_SECS);
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed() {
        let acquirer = CountingAcquirer::issuing("new-token", 3600);
        let cache = TokenCache::with_state(
            acquirer.clone(),
            CachedToken {
                value: Some("old-token".to_string()),
                expires_at: now() - 120,
            },
        );

        assert_eq!(cache.get_valid_token().await.unwrap(), "new-token");
        assert_eq!(acquirer.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_acquisition_leaves_slot_untouched() {
        let acquirer = CountingAcquirer::failing("AADSTS700016: Application not found");
        let prior = CachedToken {
            value: Some("old-token".to_string()),
            expires_at: now() - 10,
        };
        let cache = TokenCache::with_state(acquirer.clone(), prior.clone());

        match cache.get_valid_token().await {
            Err(GraphError::Auth(msg)) => assert!(msg.contains("AADSTS700016")),
            other => panic!("expected auth error, got {other:?}"),
        }
        assert_eq!(acquirer.calls(), 1);
        assert_eq!(cache.snapshot().await, prior);
    }

    #[tokio::test]
    async fn test_failures_are_not_retried() {
        let acquirer = CountingAcquirer::failing("boom");
        let cache = TokenCache::new(acquirer.clone());

        assert!(cache.get_valid_token().await.is_err());
        assert!(cache.get_valid_token().await.is_err());
        assert_eq!(acquirer.calls(), 2);
        assert_eq!(cache.snapshot().await, CachedToken::default());
    }

    #[tokio::test]
    async fn test_out_of_range_lifetime_is_auth_error() {
        let acquirer = CountingAcquirer::issuing("huge", i64::MAX);
        let cache = TokenCache::new(acquirer.clone());

        match cache.get_valid_token().await {
            Err(GraphError::Auth(msg)) => assert!(msg.contains("out of range")),
            other => panic!("expected auth error, got {other:?}"),
        }
        assert_eq!(acquirer.calls(), 1);
        assert_eq!(cache.snapshot().await, CachedToken::default());
    }
}

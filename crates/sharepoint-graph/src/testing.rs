//! Test doubles shared by the unit tests in this crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::acquirer::TokenAcquirer;
use crate::cache::TokenCache;
use crate::error::{GraphError, Result};
use crate::token::AcquiredToken;

/// Acquirer that counts calls and answers with a fixed outcome.
pub struct CountingAcquirer {
    calls: AtomicUsize,
    outcome: std::result::Result<(String, i64), String>,
}

impl CountingAcquirer {
    pub fn issuing(token: &str, expires_in: i64) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Ok((token.to_string(), expires_in)),
        })
    }

    pub fn failing(description: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Err(description.to_string()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenAcquirer for CountingAcquirer {
    async fn acquire(&self) -> Result<AcquiredToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok((token, expires_in)) => Ok(AcquiredToken {
                access_token: token.clone(),
                expires_in: *expires_in,
            }),
            Err(description) => Err(GraphError::Auth(description.clone())),
        }
    }
}

/// Cache backed by an acquirer that always issues `token`.
pub fn cache_issuing(token: &str) -> (Arc<TokenCache>, Arc<CountingAcquirer>) {
    let acquirer = CountingAcquirer::issuing(token, 3600);
    let cache = Arc::new(TokenCache::new(acquirer.clone()));
    (cache, acquirer)
}

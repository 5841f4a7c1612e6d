//! Access-token state and the refresh decision.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GraphError, Result};

/// A cached token is only reused while more than this many seconds remain.
pub const REFRESH_MARGIN_SECS: i64 = 300;

/// Contents of the single token slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedToken {
    pub value: Option<String>,
    /// UNIX timestamp (seconds)
    pub expires_at: i64,
}

/// What to do with the slot at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenAction {
    UseCached(String),
    Refresh,
}

/// Decide whether the cached token is still good enough at `now`.
pub fn decide(cached: &CachedToken, now: i64) -> TokenAction {
    match &cached.value {
        Some(value) if cached.expires_at - now > REFRESH_MARGIN_SECS => {
            TokenAction::UseCached(value.clone())
        }
        _ => TokenAction::Refresh,
    }
}

/// A successfully acquired token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredToken {
    pub access_token: String,
    /// Seconds until expiry, as reported by the identity provider.
    pub expires_in: i64,
}

/// Token endpoint response body, success or error shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<Value>,
    pub token_type: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Turn the response into a usable token or an auth error with the provider's text.
    pub fn into_acquired(self) -> Result<AcquiredToken> {
        let Some(access_token) = self.access_token else {
            let description = self
                .error_description
                .or(self.error)
                .unwrap_or_else(|| "unknown".to_string());
            return Err(GraphError::Auth(description));
        };

        // Some identity providers send expires_in as a string
        let expires_in = match &self.expires_in {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
        .ok_or_else(|| GraphError::Auth("token response has no valid expires_in".to_string()))?;

        if expires_in <= 0 {
            return Err(GraphError::Auth(format!(
                "token response has non-positive expires_in {expires_in}"
            )));
        }

        Ok(AcquiredToken {
            access_token,
            expires_in,
        })
    }
}

//! Client-credentials token acquisition against the Microsoft identity platform.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{GraphError, Result};
use crate::token::{AcquiredToken, TokenResponse};

/// Scope requested for every token.
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Source of fresh access tokens.
#[async_trait]
pub trait TokenAcquirer: Send + Sync {
    async fn acquire(&self) -> Result<AcquiredToken>;
}

/// Acquires tokens with the OAuth2 client-credentials grant.
pub struct ClientCredentialsAcquirer {
    client: Client,
    credentials: Credentials,
    authority_host: String,
}

impl ClientCredentialsAcquirer {
    pub fn new(credentials: Credentials, authority_host: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            credentials,
            authority_host: authority_host.into().trim_end_matches('/').to_string(),
        }
    }

    /// `{authority}/{tenant}/oauth2/v2.0/token`
    pub fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host, self.credentials.tenant_id
        )
    }
}

#[async_trait]
impl TokenAcquirer for ClientCredentialsAcquirer {
    async fn acquire(&self) -> Result<AcquiredToken> {
        debug!(
            "Requesting client-credentials token for client {}",
            self.credentials.client_id
        );

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret()),
            ("scope", GRAPH_SCOPE),
        ];

        let response = self
            .client
            .post(self.token_url())
            .form(&form[..])
            .send()
            .await
            .map_err(|e| GraphError::Auth(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GraphError::Auth(e.to_string()))?;

        // Error bodies carry error_description, so parse regardless of status
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|_| {
            GraphError::Auth(format!(
                "identity provider returned {} with a non-JSON body",
                status
            ))
        })?;

        parsed.into_acquired()
    }
}

use std::fmt;

use crate::error::{GraphError, Result};

const TENANT_ID_VAR: &str = "AZ_TENANT_ID";
const CLIENT_ID_VAR: &str = "AZ_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "AZ_CLIENT_SECRET";

/// App registration used for the client-credentials grant.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Build credentials from optional values, failing with every missing variable named.
    pub fn new(
        tenant_id: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self> {
        let tenant_id = non_empty(tenant_id);
        let client_id = non_empty(client_id);
        let client_secret = non_empty(client_secret);

        let missing: Vec<&str> = [
            (TENANT_ID_VAR, tenant_id.is_none()),
            (CLIENT_ID_VAR, client_id.is_none()),
            (CLIENT_SECRET_VAR, client_secret.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (tenant_id, client_id, client_secret) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(Self {
                tenant_id,
                client_id,
                client_secret,
            }),
            _ => Err(GraphError::Config(format!(
                "{} missing",
                missing.join(", ")
            ))),
        }
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

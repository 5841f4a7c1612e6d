use std::time::Duration;

use clap::Parser;
use sharepoint_graph::{
    Credentials, DEFAULT_AUTHORITY_HOST, DEFAULT_GRAPH_BASE_URL, DEFAULT_TIMEOUT_SECS,
};

/// Configuration for the sharepoint-mcp-proxy server.
#[derive(Parser, Clone)]
#[command(name = "sharepoint-mcp-proxy")]
#[command(about = "Read-only SharePoint proxy (REST + MCP) backed by Microsoft Graph")]
pub struct Config {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0", env = "PROXY_HOST")]
    pub host: String,

    /// Port to bind to
    #[arg(long, default_value = "8001", env = "PROXY_PORT")]
    pub port: u16,

    /// Azure AD tenant ID
    #[arg(long, env = "AZ_TENANT_ID")]
    pub tenant_id: Option<String>,

    /// App registration (client) ID
    #[arg(long, env = "AZ_CLIENT_ID")]
    pub client_id: Option<String>,

    /// App registration client secret
    #[arg(long, env = "AZ_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Graph API base URL
    #[arg(long, default_value = DEFAULT_GRAPH_BASE_URL, env = "GRAPH_BASE_URL")]
    pub graph_base_url: String,

    /// Identity provider authority host
    #[arg(long, default_value = DEFAULT_AUTHORITY_HOST, env = "AZ_AUTHORITY_HOST")]
    pub authority_host: String,

    /// Timeout for each Graph request in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "GRAPH_TIMEOUT_SECS")]
    pub graph_timeout_secs: u64,

    /// Which surfaces to serve
    #[arg(long, default_value = "both", env = "PROXY_SURFACE")]
    pub surface: Surface,
}

impl Config {
    /// Validated credentials; fails naming every missing variable.
    pub fn credentials(&self) -> sharepoint_graph::Result<Credentials> {
        Credentials::new(
            self.tenant_id.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
        )
    }

    pub fn graph_timeout(&self) -> Duration {
        Duration::from_secs(self.graph_timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Surface {
    /// Plain HTTP routes with an OpenAPI document
    Rest,
    /// MCP JSON-RPC endpoint
    Mcp,
    Both,
}

impl Surface {
    pub fn serves_rest(self) -> bool {
        matches!(self, Surface::Rest | Surface::Both)
    }

    pub fn serves_mcp(self) -> bool {
        matches!(self, Surface::Mcp | Surface::Both)
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Surface::Rest => write!(f, "rest"),
            Surface::Mcp => write!(f, "mcp"),
            Surface::Both => write!(f, "both"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "sharepoint-mcp-proxy",
            "--tenant-id",
            "t",
            "--client-id",
            "c",
            "--client-secret",
            "s",
            "--port",
            "9000",
            "--surface",
            "rest",
            "--graph-timeout-secs",
            "5",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.surface, Surface::Rest);
        assert_eq!(config.graph_timeout(), Duration::from_secs(5));
        assert_eq!(config.credentials().unwrap().client_id, "c");
    }

    #[test]
    fn test_surface_selection() {
        assert!(Surface::Both.serves_rest() && Surface::Both.serves_mcp());
        assert!(Surface::Rest.serves_rest() && !Surface::Rest.serves_mcp());
        assert!(!Surface::Mcp.serves_rest() && Surface::Mcp.serves_mcp());
    }
}

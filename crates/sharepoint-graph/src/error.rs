use thiserror::Error;

/// Errors raised while authenticating or talking to the Graph API.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token Error: {0}")]
    Auth(String),

    #[error("Graph API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Graph request failed: {message}")]
    Transport { message: String, timed_out: bool },

    #[error("Invalid Graph response: {0}")]
    Parse(String),
}

impl GraphError {
    /// Stable machine-readable code, shared by the HTTP and tool surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::Config(_) => "CONFIG_ERROR",
            GraphError::Auth(_) => "AUTH_ERROR",
            GraphError::Upstream { .. } => "UPSTREAM_ERROR",
            GraphError::Transport { .. } => "TRANSPORT_ERROR",
            GraphError::Parse(_) => "PARSE_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;

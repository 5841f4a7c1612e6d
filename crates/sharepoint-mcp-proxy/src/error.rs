//! Error types for the proxy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sharepoint_graph::GraphError;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ProxyError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ProxyError::Graph(e) => {
                let status = match e {
                    GraphError::Auth(_) => StatusCode::BAD_GATEWAY,
                    // Pass the upstream status through when it is an error status
                    GraphError::Upstream { status, .. } => StatusCode::from_u16(*status)
                        .ok()
                        .filter(|s| s.is_client_error() || s.is_server_error())
                        .unwrap_or(StatusCode::BAD_GATEWAY),
                    GraphError::Transport { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
                    GraphError::Transport { .. } => StatusCode::BAD_GATEWAY,
                    GraphError::Parse(_) | GraphError::Config(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.code())
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: String,
            code: &'static str,
        }

        let (status, code) = self.status_and_code();
        let body = ErrorBody {
            error: self.to_string(),
            code,
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

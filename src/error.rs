use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("prompt is required")]
    MissingPrompt,

    #[error("server configuration error: no API credential is set")]
    MissingCredential,

    // Non-success response from the image API; status is passed through
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("failed to reach the image API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image generation timed out after {attempts} status checks")]
    Timeout { attempts: u32 },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::MissingPrompt => StatusCode::BAD_REQUEST,
            GatewayError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Transport(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

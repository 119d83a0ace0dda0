use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures a single request can end in.  None of them touch the buffer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("request body exceeds the configured limit")]
    PayloadTooLarge,

    #[error("cannot read request body: {0}")]
    UnreadableBody(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) | Self::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::InvalidJson(_) | Self::UnreadableBody(_) => {
                ErrorBody { error: "Invalid JSON format" }
            }
            Self::PayloadTooLarge => ErrorBody { error: "Payload too large" },
        };
        (status, Json(body)).into_response()
    }
}

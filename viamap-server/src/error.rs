//! Maps core errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use viamap_core::Error;

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidInput(_) | Error::InvalidData(_) => StatusCode::BAD_REQUEST,
            Error::NoRoutes | Error::NoPath { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::EmptyGraph => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, "{}", self.message);
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

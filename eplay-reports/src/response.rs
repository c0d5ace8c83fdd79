use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use primitives::PeriodError;

/// The message of every upstream failure, the cause is only logged
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch external API report";

#[derive(Debug, PartialEq, Eq)]
pub enum ResponseError {
    NotFound,
    BadRequest(String),
    /// The reporting API request, body read or decoding failed
    Upstream(String),
}

impl ResponseError {
    pub fn upstream() -> Self {
        Self::Upstream(UPSTREAM_ERROR_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ResponseError::NotFound => StatusCode::NOT_FOUND,
            ResponseError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ResponseError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let message = match self {
            ResponseError::NotFound => "Not found".to_string(),
            ResponseError::BadRequest(message) | ResponseError::Upstream(message) => message,
        };

        let error_response = [("error", message)].into_iter().collect::<HashMap<_, _>>();

        (status_code, Json(error_response)).into_response()
    }
}

impl From<PeriodError> for ResponseError {
    fn from(error: PeriodError) -> Self {
        ResponseError::BadRequest(error.to_string())
    }
}

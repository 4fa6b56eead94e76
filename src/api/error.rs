use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::api::response::PrettyJson;
use crate::store::StoreError;

/// Error envelope returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// Request failures, each carrying the status it maps to.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        parameter: Option<String>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("caller is not permitted to perform this operation")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            parameter: None,
        }
    }

    /// A bad request blamed on one specific input.
    pub fn bad_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            parameter: Some(parameter.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(message) => ApiError::bad_request(message),
            StoreError::NotFound(path) => ApiError::NotFound(format!("no record at {path}")),
            StoreError::Storage(source) => ApiError::Internal(source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ApiError::Internal(source) = &self {
            log::error!("internal failure: {source:#}");
        }

        let body = match self {
            ApiError::BadRequest { message, parameter } => ErrorBody { message, parameter },
            other => ErrorBody {
                message: other.to_string(),
                parameter: None,
            },
        };

        (status, PrettyJson(body)).into_response()
    }
}

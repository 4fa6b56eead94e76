use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON responder shared by every handler. Field naming comes from the
/// serde derives (camelCase); the pretty serializer gives 2-space
/// indentation so stored documents and responses read the same.
#[derive(Debug)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(err) => {
                log::error!("response serialization failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// 200 with the requested data.
pub fn ok<T: Serialize>(data: T) -> (StatusCode, PrettyJson<T>) {
    (StatusCode::OK, PrettyJson(data))
}

/// 201 with the stored representation.
pub fn created<T: Serialize>(data: T) -> (StatusCode, PrettyJson<T>) {
    (StatusCode::CREATED, PrettyJson(data))
}

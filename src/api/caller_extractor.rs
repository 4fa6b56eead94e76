use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};

use crate::model::CallerIdentity;

/// Axum extractor for CallerIdentity from request headers:
///
/// - X-Caller-Name: optional display name
/// - X-Caller-Roles: optional comma-separated role list
///
/// Requests presenting no role headers run as the anonymous caller. The
/// hosting gateway is expected to have authenticated the caller and set
/// these headers; this service only consumes them.
#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        let name = extract_header_value(headers, "x-caller-name");
        let roles = extract_header_value(headers, "x-caller-roles")
            .map(|raw| {
                raw.split(',')
                    .map(|role| role.trim().to_string())
                    .filter(|role| !role.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(CallerIdentity::new(name, roles))
    }
}

/// Extract header value as string
fn extract_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string())
}

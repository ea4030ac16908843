//! Request authentication for the mock server.

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::mock_server::state::MockState;
use crate::CLIENT_ID_HEADER;

/// How a request authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// `Authorization: Bearer <token>`
    User,
    /// `X-MAL-CLIENT-ID: <id>`
    App,
}

/// A MyAnimeList-style error body.
pub fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": error,
            "message": message
        })),
    )
        .into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Check the request headers against the state.
///
/// A bearer token wins over a client id. When the state has a required
/// token, any other bearer token is rejected.
pub fn authorize(state: &MockState, headers: &HeaderMap) -> Result<Caller, Response> {
    let bearer = header_str(headers, AUTHORIZATION.as_str())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return match state.required_token.as_deref() {
            Some(required) if required != token => Err(error_response(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "invalid token",
            )),
            _ => Ok(Caller::User),
        };
    }

    if header_str(headers, CLIENT_ID_HEADER).is_some() {
        return Ok(Caller::App);
    }

    Err(error_response(
        StatusCode::UNAUTHORIZED,
        "invalid_token",
        "authentication required",
    ))
}

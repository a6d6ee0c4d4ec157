//! Caller identity extraction.
//!
//! Identity and authorization live in an upstream gateway; this service
//! trusts the `X-User-Id` header it injects. Requests reaching a
//! user-scoped endpoint without the header are rejected with 401.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, as asserted by the upstream gateway.
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity(pub Uuid);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing X-User-Id header"))?;

        let user_id = Uuid::parse_str(raw)
            .map_err(|_| unauthorized("X-User-Id header is not a valid UUID"))?;

        Ok(CallerIdentity(user_id))
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": {
                "code": "unauthorized",
                "message": message,
                "details": {},
            }
        })),
    )
        .into_response()
}

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Identity attached to a request that passed the gate.
///
/// Carries only what the token claims carried (id, email) - no storage
/// lookup happens in the middleware. Handlers needing the full durable
/// identity look it up explicitly by this id.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Auth gate: validates the bearer token and attaches the identity to the
/// request, or rejects with 401.
///
/// Validation failures are logged with their precise cause but collapse
/// into one client-visible message, so responses can't be used to probe
/// why a token was rejected.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Token validation failed");
        unauthorized("Invalid or expired token")
    })?;

    let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
        tracing::warn!(reason = %e, "Token carried an unparseable user id");
        unauthorized("Invalid or expired token")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Authorization header is required"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Authorization header format must be Bearer {token}"))?;

    auth_str
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Authorization header format must be Bearer {token}"))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": message })),
    )
        .into_response()
}

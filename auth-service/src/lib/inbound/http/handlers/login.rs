use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::SessionResponseData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::extractors::ApiJson;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequestBody>,
) -> Result<(StatusCode, Json<SessionResponseData>), ApiError> {
    // No shape validation on the email here: a syntactically invalid email
    // can't match a stored user, and falls into the same uniform
    // InvalidCredentials path as an unknown one.
    let session = state
        .auth_service
        .login(&body.email, &body.password)
        .await?;

    Ok((StatusCode::OK, Json((&session).into())))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

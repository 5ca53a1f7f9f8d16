use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::UserData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// "Who am I" lookup for the bearer of a valid token.
///
/// The gate only attached the claims; the durable identity is looked up
/// here, so a user deleted after token issue yields 404 rather than stale
/// data.
pub async fn me(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<(StatusCode, Json<MeResponseData>), ApiError> {
    let user = state.auth_service.get_user(&authenticated.user_id).await?;

    Ok((
        StatusCode::OK,
        Json(MeResponseData {
            user: (&user).into(),
        }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: UserData,
}

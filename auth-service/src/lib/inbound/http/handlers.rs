use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod login;
pub mod me;
pub mod register;

/// Client-visible error rendered as an `{"error": msg}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(msg) => {
                // Log the detail, never send it to the client
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict("User with this email already exists".to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            UserError::InvalidEmail(_)
            | UserError::InvalidDisplayName(_)
            | UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            UserError::PasswordHash(_)
            | UserError::TokenSigning(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Safe projection of a user for responses: no password hash, ever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Response body shared by register and login: `{user, token}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user: UserData,
    pub token: String,
}

impl From<&AuthenticatedSession> for SessionResponseData {
    fn from(session: &AuthenticatedSession) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.token.clone(),
        }
    }
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::SessionResponseData;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::extractors::ApiJson;
use crate::inbound::http::router::AppState;
use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;

const PASSWORD_MIN_LENGTH: usize = 6;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequestBody>,
) -> Result<(StatusCode, Json<SessionResponseData>), ApiError> {
    let session = state
        .auth_service
        .register(body.try_into_command()?)
        .await?;

    Ok((StatusCode::CREATED, Json((&session).into())))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
    name: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid name: {0}")]
    Name(#[from] DisplayNameError),

    #[error("Password must be at least {PASSWORD_MIN_LENGTH} characters")]
    PasswordTooShort,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let name = DisplayName::new(self.name)?;

        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(ParseRegisterRequestError::PasswordTooShort);
        }

        Ok(RegisterUserCommand::new(email, name, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

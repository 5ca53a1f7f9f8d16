use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration, login, and identity
/// lookup.
///
/// Orchestrates the credential hasher and token issuer from the `auth`
/// crate around the injected repository. Holds no mutable state of its own.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Shared hashing/token coordinator
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<AuthenticatedSession, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            name: command.name,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        // Duplicate emails surface here via the storage unique index
        let user = self.repository.create(user).await?;

        let token = self
            .authenticator
            .issue_token(user.id, user.email.as_str())
            .map_err(|e| UserError::TokenSigning(e.to_string()))?;

        Ok(AuthenticatedSession { user, token })
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, UserError> {
        // Unknown email and wrong password must be indistinguishable
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id, user.email.as_str())
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                auth::AuthenticationError::Password(err) => {
                    UserError::PasswordHash(err.to_string())
                }
                auth::AuthenticationError::Jwt(err) => UserError::TokenSigning(err.to_string()),
            })?;

        Ok(AuthenticatedSession {
            user,
            token: result.access_token,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

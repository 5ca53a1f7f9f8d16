use async_trait::async_trait;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue a token.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, name, and password
    ///
    /// # Returns
    /// Created user with a signed bearer token
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordHash` / `TokenSigning` - Cryptographic operation failed
    /// * `DatabaseError` - Storage operation failed
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<AuthenticatedSession, UserError>;

    /// Verify credentials and issue a token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`,
    /// deliberately indistinguishable to the caller.
    ///
    /// # Arguments
    /// * `email` - Login email as submitted
    /// * `password` - Plaintext password to verify
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user or password mismatch
    /// * `TokenSigning` - Token issuance failed
    /// * `DatabaseError` - Storage operation failed
    async fn login(&self, email: &str, password: &str)
        -> Result<AuthenticatedSession, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Storage operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for the user identity.
///
/// The storage backend is an external collaborator: the service only needs
/// create plus lookup by identifier and by email. Email uniqueness is
/// enforced by the backend itself (unique index), not by a pre-check here,
/// so concurrent duplicate registrations cannot race past each other.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}

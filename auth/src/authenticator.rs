use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Holds no shared mutable state: every operation is a function of its
/// inputs plus wall-clock time, so an `Authenticator` can be shared freely
/// across request handlers.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Jwt(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing; must be non-empty
    /// * `token_lifetime` - Validity window for issued tokens
    ///
    /// # Errors
    /// * `InvalidSecret` - The secret is empty
    pub fn new(jwt_secret: &[u8], token_lifetime: Duration) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret)?,
            token_lifetime,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Issue a signed token for an already-verified identity.
    ///
    /// Used after registration, where the credential was just created and
    /// needs no verification round.
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    pub fn issue_token(
        &self,
        user_id: impl ToString,
        email: impl ToString,
    ) -> Result<String, JwtError> {
        let claims = Claims::issue(user_id, email, self.token_lifetime);
        self.jwt_handler.encode(&claims)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identity id to embed in the token
    /// * `email` - Email to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is malformed
    /// * `Jwt` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
        email: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(user_id, email)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, wrongly signed, or outside its
    ///   validity window
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

//! Authentication core library
//!
//! Provides the reusable authentication mechanism behind the HTTP service:
//! - Password hashing (Argon2id, salted, one-way)
//! - Signed bearer token issuance and validation (JWT, HS256)
//! - Authentication coordination
//!
//! The server holds no token state: validation is purely a function of
//! (token string, shared secret, current time).
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = Claims::issue("user123", "alice@example.com", Duration::hours(24));
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.user_id, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24))
//!     .unwrap();
//!
//! // Register: hash password, then issue a token
//! let hash = auth.hash_password("password123").unwrap();
//! let token = auth.issue_token("user123", "alice@example.com").unwrap();
//!
//! // Login: verify and issue in one step
//! let result = auth
//!     .authenticate("password123", &hash, "user123", "alice@example.com")
//!     .unwrap();
//!
//! // Protected request: validate the presented token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;

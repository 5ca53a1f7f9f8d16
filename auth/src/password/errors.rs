use thiserror::Error;

/// Error type for password operations.
///
/// A plain mismatch during verification is NOT an error: `verify` returns
/// `Ok(false)` for that. These variants cover the exceptional cases only.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    InvalidHashFormat(String),
}

use thiserror::Error;

/// Error type for JWT operations.
///
/// Validation failures are kept distinct internally so callers can log the
/// precise cause; HTTP layers are expected to collapse them into a single
/// client-visible message.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Signing secret is empty or unusable for HMAC")]
    InvalidSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unexpected signing method")]
    UnexpectedSigningMethod,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,
}

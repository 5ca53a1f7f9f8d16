use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Token issuer and validator.
///
/// Signs and verifies compact three-segment tokens with HS256. Validation is
/// a pure function of (token, secret, wall clock): no I/O, no state.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

/// Header fields we inspect before handing the token to the library.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

impl JwtHandler {
    /// Create a new handler keyed by `secret`.
    ///
    /// The secret should be at least 256 bits (32 bytes) for HS256 and must
    /// come from configuration, never from a source-embedded default.
    ///
    /// # Errors
    /// * `InvalidSecret` - The secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token, returning its claims.
    ///
    /// Checks run in order and all must pass: structural decode, declared
    /// algorithm (HS256 only, so an `alg: none` or asymmetric header can
    /// never skip signature verification), HMAC signature, and the
    /// `nbf <= now <= exp` window with zero leeway.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three valid base64url segments
    /// * `UnexpectedSigningMethod` - Header declares anything but HS256
    /// * `InvalidSignature` - HMAC does not match
    /// * `TokenExpired` / `TokenNotYetValid` - Outside the validity window
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        self.check_declared_algorithm(token)?;

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::ImmatureSignature => JwtError::TokenNotYetValid,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    JwtError::UnexpectedSigningMethod
                }
                _ => JwtError::MalformedToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Reject anything but the expected symmetric algorithm before signature
    /// verification runs.
    fn check_declared_algorithm(&self, token: &str) -> Result<(), JwtError> {
        let mut segments = token.split('.');
        let header_segment = segments
            .next()
            .ok_or_else(|| JwtError::MalformedToken("missing header segment".to_string()))?;

        if segments.count() != 2 {
            return Err(JwtError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ));
        }

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_segment)
            .map_err(|e| JwtError::MalformedToken(format!("invalid header encoding: {}", e)))?;

        let header: RawHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| JwtError::MalformedToken(format!("invalid header: {}", e)))?;

        if header.alg != "HS256" {
            return Err(JwtError::UnexpectedSigningMethod);
        }

        Ok(())
    }
}

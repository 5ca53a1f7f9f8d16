use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload embedded in every issued token.
///
/// Carries the subject identity (`user_id`, `email`) plus the standard
/// timing fields. Nothing else goes into the token: in particular, the
/// password hash never appears here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject identifier (the user's id, string-encoded)
    pub user_id: String,

    /// Email address the user logs in with
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a freshly issued token.
    ///
    /// `iat` and `nbf` are set to the current time, `exp` to
    /// `now + lifetime`.
    pub fn issue(user_id: impl ToString, email: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_timing_fields() {
        let claims = Claims::issue("user123", "alice@example.com", Duration::hours(24));

        assert_eq!(claims.user_id, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_serialized_keys_match_wire_format() {
        let claims = Claims {
            user_id: "user123".to_string(),
            email: "alice@example.com".to_string(),
            iat: 100,
            nbf: 100,
            exp: 200,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["user_id"], "user123");
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["iat"], 100);
        assert_eq!(json["nbf"], 100);
        assert_eq!(json["exp"], 200);
    }
}

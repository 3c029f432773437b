use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fmt;

use crate::errors::InternalError;
use crate::errors::internal::JWTValidationError;
use crate::types::internal::Claims;

/// Validates bearer JWTs issued by the external auth collaborator
///
/// Tokens are HS256-signed with a secret shared with that collaborator.
pub struct TokenProvider {
    secret: String,
}

impl TokenProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Validate a JWT and return its claims
    ///
    /// Signature and expiry are both checked.
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, JWTValidationError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &DecodingKey::from_secret(self.secret.as_bytes()), &validation)
            .map_err(JWTValidationError::from)?;

        Ok(token_data.claims)
    }

    /// Sign a token for the given subject
    ///
    /// A negative `ttl_minutes` yields an already expired token. Lifetimes
    /// whose expiry would not fit a timestamp are rejected.
    ///
    /// Used by the `token` CLI command to mint development tokens and by tests;
    /// production tokens come from the auth collaborator.
    pub fn generate_jwt(
        &self,
        user_id: &str,
        email: Option<String>,
        ttl_minutes: i64,
    ) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let exp = ttl_minutes
            .checked_mul(60)
            .and_then(|ttl_secs| now.checked_add(ttl_secs))
            .ok_or_else(|| InternalError::parse("ttl_minutes", format!("Invalid token lifetime: {} minutes", ttl_minutes)))?;

        let claims = Claims {
            sub: user_id.to_owned(),
            exp,
            iat: now,
            email,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| InternalError::parse("jwt", format!("Failed to sign JWT: {}", e)))
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider").field("secret", &"[redacted]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-minimum-32-characters-long";

    #[test]
    fn test_generated_token_validates() {
        let provider = TokenProvider::new(SECRET);
        let token = provider
            .generate_jwt("user-1", Some("ops@example.go.id".to_string()), 15)
            .unwrap();

        let claims = provider.validate_jwt(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("ops@example.go.id"));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let provider = TokenProvider::new(SECRET);
        let token = provider.generate_jwt("user-1", None, -10).unwrap();

        assert!(matches!(provider.validate_jwt(&token), Err(JWTValidationError::Expired)));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = TokenProvider::new("another-secret-key-minimum-32-characters");
        let token = issuer.generate_jwt("user-1", None, 15).unwrap();

        let provider = TokenProvider::new(SECRET);
        assert!(matches!(
            provider.validate_jwt(&token),
            Err(JWTValidationError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let provider = TokenProvider::new(SECRET);
        assert!(matches!(
            provider.validate_jwt("not-a-jwt"),
            Err(JWTValidationError::Malformed { .. })
        ));
    }

    #[test]
    fn test_out_of_range_lifetime_is_rejected() {
        let provider = TokenProvider::new(SECRET);

        for ttl in [i64::MAX, i64::MAX / 60, i64::MIN] {
            let result = provider.generate_jwt("user-1", None, ttl);
            assert!(
                matches!(result, Err(InternalError::Parse { ref value_type, .. }) if value_type == "ttl_minutes"),
                "ttl {ttl} should be rejected"
            );
        }
    }
}

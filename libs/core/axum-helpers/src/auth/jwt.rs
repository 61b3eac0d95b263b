use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::config::JwtConfig;

/// Token lifetime: 7 days
pub const TOKEN_TTL: i64 = 604_800;

/// Access roles carried in every token
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Admin,
    #[default]
    Customer,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid, // User ID
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
}

/// Stateless HS256 token issuer and verifier.
///
/// There is no revocation list; a token is valid until `exp`.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        tracing::info!(ttl_seconds = config.ttl_seconds, "JWT auth initialized");

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Sign a token for `user_id` carrying `role`.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(AuthError::Signing)
    }

    /// Check signature and expiry and return the claims.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-that-is-long-enough-000";

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET))
    }

    #[test]
    fn test_issue_then_verify_returns_identity_and_role() {
        let auth = auth();
        let user_id = Uuid::now_v7();

        let token = auth.issue(user_id, Role::Admin).unwrap();
        let claims = auth.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL);
    }

    #[test]
    fn test_verify_rejects_token_signed_with_other_secret() {
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-long-enough-111"));
        let token = other.issue(Uuid::now_v7(), Role::Customer).unwrap();

        assert!(matches!(
            auth().verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Beyond the default 60s leeway
        let expired = JwtAuth::new(&JwtConfig::new(SECRET).with_ttl(-3600));
        let token = expired.issue(Uuid::now_v7(), Role::Customer).unwrap();

        assert!(auth().verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(auth().verify("not.a.jwt").is_err());
    }

    #[test]
    fn test_role_parsing_and_display() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Customer".parse::<Role>().unwrap(), Role::Customer);
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::default(), Role::Customer);
    }
}

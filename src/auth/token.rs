use chrono::{Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,  // User ID
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,  // User ID
    pub iat: i64,
    pub exp: i64,
}

/// Signs access and refresh tokens with a single shared secret.
///
/// The secret is injected at construction and the issuer performs no I/O;
/// a missing secret is a startup failure, not a per-request one.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(
        secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::Config(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        })
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issue_access_token(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        let data = decode::<AccessClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(data.claims)
    }

    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let data = decode::<RefreshClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test_secret", Duration::minutes(15), Duration::days(7)).unwrap()
    }

    #[test]
    fn test_access_token_claims_and_lifetime() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let token = issuer.issue_access_token(user_id, "maya@example.com").unwrap();
        let claims = issuer.decode_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "maya@example.com");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_refresh_token_claims_and_lifetime() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let token = issuer.issue_refresh_token(user_id).unwrap();
        let claims = issuer.decode_refresh_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_decoding_with_wrong_secret_fails() {
        let issuer = issuer();
        let other =
            TokenIssuer::new("other_secret", Duration::minutes(15), Duration::days(7)).unwrap();
        let user_id = Uuid::new_v4();

        let access = issuer.issue_access_token(user_id, "maya@example.com").unwrap();
        let refresh = issuer.issue_refresh_token(user_id).unwrap();

        assert!(other.decode_access_token(&access).is_err());
        assert!(other.decode_refresh_token(&refresh).is_err());
    }

    #[test]
    fn test_empty_secret_is_a_config_error() {
        let result = TokenIssuer::new("", Duration::minutes(15), Duration::days(7));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_access_and_refresh_tokens_differ() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let access = issuer.issue_access_token(user_id, "maya@example.com").unwrap();
        let refresh = issuer.issue_refresh_token(user_id).unwrap();

        assert_ne!(access, refresh);
        // The refresh token carries no email claim.
        assert!(issuer.decode_access_token(&refresh).is_err());
    }
}

// JWT token service for authentication
// Decision: Self-contained signed access tokens; nothing is stored server-side
// Decision: Zero leeway on expiry so an expired token is rejected immediately

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::JwtConfig;

/// Token type marker carried in every access token
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Token type
    pub token_type: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl AccessTokenClaims {
    /// Parse the subject as a user ID
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).context("Invalid user ID in token")
    }
}

/// JWT service for token generation and validation
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate access token for a user
    pub fn generate_access_token(&self, user_id: Uuid, email: &str) -> Result<String> {
        let now = Utc::now();
        let exp = Duration::from_std(self.config.access_token_lifetime)
            .ok()
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .context("Access token lifetime out of range")?;

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .context("Failed to encode access token")
    }

    /// Validate and decode an access token
    pub fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .context("Invalid access token")?;

        if token_data.claims.token_type != ACCESS_TOKEN_TYPE {
            anyhow::bail!("Invalid token type");
        }

        Ok(token_data.claims)
    }

    /// Get access token lifetime in seconds
    pub fn access_token_lifetime_secs(&self) -> i64 {
        i64::try_from(self.config.access_token_lifetime.as_secs()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;
    use std::time::Duration as StdDuration;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            algorithm: Algorithm::HS256,
            access_token_lifetime: StdDuration::from_secs(900),
        }
    }

    fn sign(claims: &AccessTokenClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_access_token() {
        let service = JwtService::new(test_config());
        let user_id = Uuid::now_v7();
        let token = service
            .generate_access_token(user_id, "a@bu.edu")
            .unwrap();

        assert!(!token.is_empty());

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "a@bu.edu");
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_invalid_token() {
        let service = JwtService::new(test_config());
        assert!(service.validate_access_token("invalid-token").is_err());
        assert!(service.validate_access_token("").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(test_config());
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: Uuid::nil().to_string(),
            email: "a@bu.edu".to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: now - 5,
            iat: now - 905,
        };

        let token = sign(&claims, "test-secret-key-for-testing");
        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = JwtService::new(test_config());
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: Uuid::nil().to_string(),
            email: "a@bu.edu".to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: now + 600,
            iat: now,
        };

        let token = sign(&claims, "someone-elses-secret");
        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_token_type_rejected() {
        let service = JwtService::new(test_config());
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: Uuid::nil().to_string(),
            email: "a@bu.edu".to_string(),
            token_type: "refresh".to_string(),
            exp: now + 600,
            iat: now,
        };

        let token = sign(&claims, "test-secret-key-for-testing");
        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let hs512 = JwtService::new(JwtConfig {
            algorithm: Algorithm::HS512,
            ..test_config()
        });
        let hs256 = JwtService::new(test_config());

        let token = hs512.generate_access_token(Uuid::nil(), "a@bu.edu").unwrap();
        assert!(hs512.validate_access_token(&token).is_ok());
        assert!(hs256.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_unrepresentable_lifetime_is_an_error() {
        let service = JwtService::new(JwtConfig {
            access_token_lifetime: StdDuration::from_secs(100_000_000_000_000),
            ..test_config()
        });
        assert!(service.generate_access_token(Uuid::nil(), "a@bu.edu").is_err());

        let service = JwtService::new(JwtConfig {
            access_token_lifetime: StdDuration::from_secs(u64::MAX),
            ..test_config()
        });
        assert!(service.generate_access_token(Uuid::nil(), "a@bu.edu").is_err());
        assert_eq!(service.access_token_lifetime_secs(), i64::MAX);
    }

    #[test]
    fn test_lifetime_secs() {
        let service = JwtService::new(test_config());
        assert_eq!(service.access_token_lifetime_secs(), 900);
    }
}

// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config, with the legacy SECRET_KEY /
// ALGORITHM / ACCESS_TOKEN_EXPIRE_MINUTES names accepted as fallbacks
// Decision: Only HMAC algorithms; the secret is a shared key

use jsonwebtoken::Algorithm;
use std::str::FromStr;
use std::time::Duration;

/// Default access token lifetime (30 minutes)
pub const DEFAULT_ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Longest accepted access token lifetime (365 days)
pub const MAX_ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs
    pub secret: String,
    /// Signing algorithm (HS256, HS384 or HS512)
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: Algorithm::HS256,
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Whether to disable signup (registration)
    pub disable_signup: bool,
    /// Whether the access_token cookie is marked Secure
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            disable_signup: false,
            cookie_secure: true,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |primary: &str, legacy: &str| {
            lookup(primary)
                .or_else(|| lookup(legacy))
                .filter(|s| !s.is_empty())
        };

        let secret = var("AUTH_JWT_SECRET", "SECRET_KEY").unwrap_or_else(|| {
            tracing::warn!(
                "AUTH_JWT_SECRET not set, generating a random secret; tokens will not survive a restart"
            );
            use rand::Rng;
            let bytes: [u8; 32] = rand::thread_rng().gen();
            hex::encode(bytes)
        });

        let algorithm = var("AUTH_JWT_ALGORITHM", "ALGORITHM")
            .map(|s| {
                parse_hmac_algorithm(&s).unwrap_or_else(|| {
                    tracing::warn!(algorithm = %s, "Unsupported JWT algorithm, using HS256");
                    Algorithm::HS256
                })
            })
            .unwrap_or(Algorithm::HS256);

        let requested_secs = lookup("AUTH_JWT_ACCESS_TOKEN_LIFETIME")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .or_else(|| {
                lookup("ACCESS_TOKEN_EXPIRE_MINUTES")
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    // Overflow lands in the out-of-range branch below
                    .map(|mins| mins.checked_mul(60).unwrap_or(u64::MAX))
            });
        let access_token_lifetime = match requested_secs.map(Duration::from_secs) {
            Some(lifetime)
                if !lifetime.is_zero() && lifetime <= MAX_ACCESS_TOKEN_LIFETIME =>
            {
                lifetime
            }
            Some(lifetime) => {
                tracing::warn!(
                    requested_secs = lifetime.as_secs(),
                    max_secs = MAX_ACCESS_TOKEN_LIFETIME.as_secs(),
                    "Access token lifetime out of range, using default"
                );
                DEFAULT_ACCESS_TOKEN_LIFETIME
            }
            None => DEFAULT_ACCESS_TOKEN_LIFETIME,
        };

        let disable_signup = lookup("AUTH_DISABLE_SIGNUP")
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        let cookie_secure = lookup("AUTH_COOKIE_SECURE")
            .map(|s| parse_flag(&s))
            .unwrap_or(true);

        Self {
            jwt: JwtConfig {
                secret,
                algorithm,
                access_token_lifetime,
            },
            disable_signup,
            cookie_secure,
        }
    }
}

fn parse_flag(s: &str) -> bool {
    s.to_lowercase() == "true" || s == "1"
}

/// Parse an HMAC JWT algorithm name. Asymmetric algorithms are rejected.
pub fn parse_hmac_algorithm(s: &str) -> Option<Algorithm> {
    match Algorithm::from_str(&s.trim().to_uppercase()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Some(alg),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AuthConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
        assert_eq!(config.jwt.access_token_lifetime, Duration::from_secs(1800));
        assert_eq!(config.jwt.secret.len(), 64); // random 32 bytes, hex
        assert!(!config.disable_signup);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_random_secret_differs_per_load() {
        assert_ne!(config_from(&[]).jwt.secret, config_from(&[]).jwt.secret);
    }

    #[test]
    fn test_legacy_variable_names() {
        let config = config_from(&[
            ("SECRET_KEY", "legacy-secret"),
            ("ALGORITHM", "HS512"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "45"),
        ]);
        assert_eq!(config.jwt.secret, "legacy-secret");
        assert_eq!(config.jwt.algorithm, Algorithm::HS512);
        assert_eq!(config.jwt.access_token_lifetime, Duration::from_secs(45 * 60));
    }

    #[test]
    fn test_prefixed_names_win() {
        let config = config_from(&[
            ("AUTH_JWT_SECRET", "new-secret"),
            ("SECRET_KEY", "legacy-secret"),
            ("AUTH_JWT_ACCESS_TOKEN_LIFETIME", "120"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "45"),
        ]);
        assert_eq!(config.jwt.secret, "new-secret");
        assert_eq!(config.jwt.access_token_lifetime, Duration::from_secs(120));
    }

    #[test]
    fn test_out_of_range_lifetime_falls_back() {
        for pairs in [
            [("AUTH_JWT_ACCESS_TOKEN_LIFETIME", "100000000000000")],
            [("AUTH_JWT_ACCESS_TOKEN_LIFETIME", "0")],
            [("ACCESS_TOKEN_EXPIRE_MINUTES", "18446744073709551615")],
        ] {
            let config = config_from(&pairs);
            assert_eq!(config.jwt.access_token_lifetime, DEFAULT_ACCESS_TOKEN_LIFETIME);
        }

        let config = config_from(&[("AUTH_JWT_ACCESS_TOKEN_LIFETIME", "31536000")]);
        assert_eq!(config.jwt.access_token_lifetime, MAX_ACCESS_TOKEN_LIFETIME);
    }

    #[test]
    fn test_flags() {
        let config = config_from(&[("AUTH_DISABLE_SIGNUP", "TRUE"), ("AUTH_COOKIE_SECURE", "0")]);
        assert!(config.disable_signup);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_parse_hmac_algorithm() {
        assert_eq!(parse_hmac_algorithm("hs256"), Some(Algorithm::HS256));
        assert_eq!(parse_hmac_algorithm("HS384"), Some(Algorithm::HS384));
        assert_eq!(parse_hmac_algorithm("RS256"), None);
        assert_eq!(parse_hmac_algorithm("nonsense"), None);
    }

    #[test]
    fn test_unsupported_algorithm_falls_back() {
        let config = config_from(&[("AUTH_JWT_ALGORITHM", "ES256")]);
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
    }
}

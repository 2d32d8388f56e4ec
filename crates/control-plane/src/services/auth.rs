// Auth service: account creation, credential checks, token issue/verify

use std::sync::Arc;

use sparkbytes_core::User;
use tracing::Instrument;

use super::{user::row_to_user, ServiceError, ServiceResult};
use crate::api::validation::{validate_login, validate_signup, ValidatedSignup};
use crate::auth::config::AuthConfig;
use crate::auth::jwt::JwtService;
use crate::auth::routes::{LoginRequest, SignupRequest};
use crate::storage::{
    password::{hash_password, verify_against_dummy, verify_password},
    CreateUserRow, StorageBackend,
};

/// A freshly issued bearer token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

pub struct AuthService {
    db: Arc<StorageBackend>,
    jwt: Arc<JwtService>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(db: Arc<StorageBackend>, config: AuthConfig) -> Self {
        let jwt = Arc::new(JwtService::new(config.jwt.clone()));
        Self { db, jwt, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new account
    pub async fn signup(&self, req: SignupRequest) -> ServiceResult<User> {
        if self.config.disable_signup {
            return Err(ServiceError::forbidden("Registration is disabled"));
        }

        let input = validate_signup(&req)?;
        let span = tracing::info_span!(
            "auth.signup",
            "user.email" = %input.email,
            "user.id" = tracing::field::Empty,
        );

        self.signup_inner(input).instrument(span).await
    }

    async fn signup_inner(&self, input: ValidatedSignup) -> ServiceResult<User> {
        let span = tracing::Span::current();

        // Pre-check skips Argon2 for known emails; the insert below remains
        // authoritative.
        if self.db.get_user_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::DuplicateUser);
        }

        let password_hash = hash_password(&input.password)?;
        let row = self
            .db
            .create_user(CreateUserRow {
                email: input.email,
                first_name: input.first_name,
                last_name: input.last_name,
                password_hash,
            })
            .await?
            .ok_or(ServiceError::DuplicateUser)?;

        span.record("user.id", row.id.to_string().as_str());
        tracing::info!(user_id = %row.id, "User registered");
        Ok(row_to_user(row))
    }

    /// Check credentials and issue an access token
    pub async fn login(&self, req: LoginRequest) -> ServiceResult<IssuedToken> {
        let input = validate_login(&req)?;

        let Some(user) = self.db.get_user_by_email(&input.email).await? else {
            verify_against_dummy(&input.password);
            tracing::debug!("Login for unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let access_token = self.jwt.generate_access_token(user.id, &user.email)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(IssuedToken {
            access_token,
            expires_in: self.jwt.access_token_lifetime_secs(),
        })
    }

    /// Resolve a bearer token to its user
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.jwt.validate_access_token(token).map_err(|e| {
            tracing::debug!("JWT validation failed: {:#}", e);
            ServiceError::unauthorized("Invalid or expired token")
        })?;

        let user_id = claims
            .user_id()
            .map_err(|_| ServiceError::unauthorized("Invalid user ID in token"))?;

        let user = self
            .db
            .get_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::unauthorized("User not found for token"))?;

        Ok(row_to_user(user))
    }
}

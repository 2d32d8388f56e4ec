// Authentication middleware and extractors
// Decision: Support both cookie-based (UI) and header-based (API) auth
// Decision: Header wins over cookie when both are present

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use sparkbytes_core::User;
use std::sync::Arc;

use super::config::AuthConfig;
use crate::services::{AuthService, ServiceError};
use crate::storage::StorageBackend;

/// Name of the cookie set by `/login`
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authentication error
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn internal() -> Self {
        Self {
            error: "Internal server error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for AuthError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized(message) => Self::unauthorized(&message),
            other => {
                tracing::error!("Failed to authenticate request: {:#}", other);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Authenticated user extracted from the request.
/// Rejects with 401 if no valid token is presented.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub service: Arc<AuthService>,
}

impl AuthState {
    pub fn new(config: AuthConfig, db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(AuthService::new(db, config)),
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let token = bearer_token(parts)?
            .ok_or_else(|| AuthError::unauthorized("Authentication required"))?;

        let user = auth_state.service.authenticate(&token).await?;
        Ok(AuthUser(user))
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Pull the raw token from `Authorization: Bearer` or the access_token cookie
fn bearer_token(parts: &Parts) -> Result<Option<String>, AuthError> {
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AuthError::unauthorized("Invalid authorization header"))?;

        // Auth scheme names are case-insensitive
        return match auth_str.trim().split_once(' ') {
            Some((scheme, token))
                if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
            {
                Ok(Some(token.trim().to_string()))
            }
            _ => Err(AuthError::unauthorized("Invalid authorization header")),
        };
    }

    let jar = CookieJar::from_headers(&parts.headers);
    Ok(jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(name: header::HeaderName, value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(name, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_auth_error() {
        let error = AuthError::unauthorized("Test error");
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(error.error, "Test error");

        let internal = AuthError::from(ServiceError::Internal(anyhow::anyhow!("db down")));
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!internal.error.contains("db down"));
    }

    #[test]
    fn test_bearer_header() {
        let parts = parts_with(header::AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts).unwrap().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_scheme_case_insensitive() {
        for value in ["bearer abc.def.ghi", "BEARER abc.def.ghi", "Bearer   abc.def.ghi"] {
            let parts = parts_with(header::AUTHORIZATION, value);
            assert_eq!(bearer_token(&parts).unwrap().as_deref(), Some("abc.def.ghi"));
        }
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let parts = parts_with(header::AUTHORIZATION, "Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&parts).unwrap_err().status, StatusCode::UNAUTHORIZED);

        let parts = parts_with(header::AUTHORIZATION, "Bearer ");
        assert!(bearer_token(&parts).is_err());
    }

    #[test]
    fn test_cookie_fallback() {
        let parts = parts_with(header::COOKIE, "theme=dark; access_token=from-cookie");
        assert_eq!(bearer_token(&parts).unwrap().as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_no_credentials() {
        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert!(bearer_token(&parts).unwrap().is_none());
    }
}

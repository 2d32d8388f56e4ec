// Authentication HTTP routes
// Decision: Keep the flat /signup, /login, /profile paths the frontend already calls
// Decision: Login answers with JSON and also sets the access_token cookie

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use serde::{Deserialize, Serialize};
use sparkbytes_core::User;
use utoipa::ToSchema;

use super::middleware::{AuthState, AuthUser, ACCESS_TOKEN_COOKIE};
use crate::api::common::{ApiJson, ErrorResponse};
use crate::services::ServiceError;

/// Signup request. Missing fields are reported by validation as 422.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    #[schema(example = "a@bu.edu")]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(example = "Password123")]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Login request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Token response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .with_state(state)
}

/// POST /signup - Register a new user
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Email already registered", body = ErrorResponse),
        (status = 403, description = "Registration is disabled", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AuthState>,
    WithRejection(Json(req), _): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<User>), ServiceError> {
    let user = state.service.signup(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /login - Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Incorrect email or password", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    WithRejection(Json(req), _): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), ServiceError> {
    let issued = state.service.login(req).await?;

    let access_cookie = Cookie::build((ACCESS_TOKEN_COOKIE, issued.access_token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.service.config().cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(issued.expires_in))
        .build();

    Ok((
        jar.add(access_cookie),
        Json(TokenResponse {
            access_token: issued.access_token,
            token_type: "bearer".to_string(),
            expires_in: issued.expires_in,
        }),
    ))
}

/// GET /profile - Current user
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Authenticated user", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn profile(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_missing_fields_deserialize() {
        let req: SignupRequest = serde_json::from_str(r#"{"email": "a@bu.edu"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@bu.edu"));
        assert!(req.password.is_none());
        assert!(req.first_name.is_none());
    }

    #[test]
    fn test_token_response_shape() {
        let json = serde_json::to_value(TokenResponse {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 1800,
        })
        .unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["expires_in"], 1800);
    }
}

// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Spark! Bytes API.
// It can be used by both the main API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use crate::api::{ErrorResponse, ListResponse};
use crate::auth::routes as auth_routes;
use sparkbytes_core::{Event, User};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

/// OpenAPI documentation for the Spark! Bytes API
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        auth_routes::signup,
        auth_routes::login,
        auth_routes::profile,
        api::users::list_users,
        api::events::list_events,
        api::events::create_event,
        api::events::update_event,
        api::events::delete_event,
    ),
    components(
        schemas(
            User, Event,
            auth_routes::SignupRequest, auth_routes::LoginRequest, auth_routes::TokenResponse,
            api::events::EventRequest,
            ErrorResponse,
            ListResponse<User>,
            ListResponse<Event>,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and the current user"),
        (name = "users", description = "User listing endpoints"),
        (name = "events", description = "Food event endpoints")
    ),
    info(
        title = "Spark! Bytes API",
        version = "0.1.0",
        description = "API for sharing leftover food from campus events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> String {
        Self::openapi()
            .to_pretty_json()
            .expect("Failed to serialize OpenAPI spec")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_routes_and_bearer_scheme() {
        let spec: serde_json::Value = serde_json::from_str(&ApiDoc::to_json()).unwrap();
        for path in ["/signup", "/login", "/profile", "/users", "/events", "/create-event"] {
            assert!(spec["paths"].get(path).is_some(), "missing {path}");
        }
        assert!(spec["paths"].get("/events/{event_id}").is_some());
        assert!(spec["components"]["securitySchemes"]
            .get("bearer_auth")
            .is_some());
    }

    #[test]
    fn test_user_schema_has_no_password() {
        let spec: serde_json::Value = serde_json::from_str(&ApiDoc::to_json()).unwrap();
        let user = &spec["components"]["schemas"]["User"]["properties"];
        assert!(user.get("email").is_some());
        assert!(user.get("password_hash").is_none());
    }
}

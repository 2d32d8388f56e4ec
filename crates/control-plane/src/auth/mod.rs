// Authentication module
// Decision: Stateless JWT access tokens, no refresh tokens or server-side sessions

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::AuthConfig;
pub use middleware::{AuthState, AuthUser, FromRef};

// Services layer for business logic
// Services own business logic and validation, calling storage directly

pub mod auth;
pub mod error;
pub mod event;
pub mod user;

pub use auth::{AuthService, IssuedToken};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use user::UserService;

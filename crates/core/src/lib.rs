// Spark! Bytes core
//
// DB-agnostic domain types shared by the API server and tooling, plus the
// tracing setup every binary uses.

// Telemetry (tracing-subscriber setup)
pub mod telemetry;

// Domain entity types
pub mod event;
pub mod user;

pub use event::Event;
pub use user::User;

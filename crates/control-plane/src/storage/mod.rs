// Storage layer for the Spark! Bytes control-plane
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: sqlx repository over PostgreSQL
// - InMemoryDatabase: HashMap-backed store with the same constraints
// - StorageBackend: enum dispatch between the two

pub mod backend;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;

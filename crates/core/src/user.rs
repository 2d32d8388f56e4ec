// User domain types
//
// The public shape of a registered user. Credentials never leave the storage
// layer; this type has no password field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A registered Spark! Bytes user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct User {
    /// Unique identifier for the user.
    pub id: Uuid,
    /// Email address used to log in. Unique across all users.
    #[cfg_attr(feature = "openapi", schema(example = "a@bu.edu"))]
    pub email: String,
    /// Given name.
    #[cfg_attr(feature = "openapi", schema(example = "Ada"))]
    pub first_name: String,
    /// Family name.
    #[cfg_attr(feature = "openapi", schema(example = "Lovelace"))]
    pub last_name: String,
    /// Timestamp when the account was created.
    pub created_at: DateTime<Utc>,
}

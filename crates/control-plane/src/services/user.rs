// User service: read-only listing of accounts

use std::sync::Arc;

use anyhow::Result;
use sparkbytes_core::User;

use crate::storage::{StorageBackend, UserRow};

pub struct UserService {
    db: Arc<StorageBackend>,
}

impl UserService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = self.db.list_users().await?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }
}

/// Strip storage-only columns (password hash, updated_at) from a user row
pub(crate) fn row_to_user(row: UserRow) -> User {
    User {
        id: row.id,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        created_at: row.created_at,
    }
}

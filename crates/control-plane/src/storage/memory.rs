// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// Mirrors the PostgreSQL repository, including the unique email/name
// constraints and the organizer foreign key, so the server and the test suite
// can run without a database.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
    events: RwLock<HashMap<Uuid, EventRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<Option<UserRow>> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == input.email) {
            return Ok(None);
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = UserRow {
            id,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, row.clone());
        Ok(Some(row))
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        Ok(self.users.read().get(&id).cloned())
    }

    pub async fn list_users(&self) -> Result<Vec<UserRow>> {
        let mut result: Vec<_> = self.users.read().values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<Option<EventRow>> {
        if !self.users.read().contains_key(&input.organizer_id) {
            return Err(anyhow!(
                "Organizer {} does not reference an existing user",
                input.organizer_id
            ));
        }

        let mut events = self.events.write();
        if events.values().any(|e| e.name == input.name) {
            return Ok(None);
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = EventRow {
            id,
            organizer_id: input.organizer_id,
            name: input.name,
            description: input.description,
            location: input.location,
            date: input.date,
            time: input.time,
            food_details: input.food_details,
            created_at: now,
            updated_at: now,
        };
        events.insert(id, row.clone());
        Ok(Some(row))
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        Ok(self.events.read().get(&id).cloned())
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let mut result: Vec<_> = self.events.read().values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    pub async fn update_event(&self, id: Uuid, input: UpdateEventRow) -> Result<UpdateEventOutcome> {
        let mut events = self.events.write();
        if !events.contains_key(&id) {
            return Ok(UpdateEventOutcome::NotFound);
        }
        if events.values().any(|e| e.id != id && e.name == input.name) {
            return Ok(UpdateEventOutcome::NameTaken);
        }

        let Some(event) = events.get_mut(&id) else {
            return Ok(UpdateEventOutcome::NotFound);
        };
        event.name = input.name;
        event.description = input.description;
        event.location = input.location;
        event.date = input.date;
        event.time = input.time;
        event.food_details = input.food_details;
        event.updated_at = Self::now();
        Ok(UpdateEventOutcome::Updated(event.clone()))
    }

    pub async fn delete_event(&self, id: Uuid) -> Result<bool> {
        Ok(self.events.write().remove(&id).is_some())
    }
}

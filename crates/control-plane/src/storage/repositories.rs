// Repository layer for PostgreSQL
// Decision: Unique constraints are enforced by the database; inserts use
// ON CONFLICT DO NOTHING so a duplicate comes back as None instead of an error

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::models::*;

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, password_hash, created_at, updated_at";

const EVENT_COLUMNS: &str =
    "id, organizer_id, name, description, location, date, time, food_details, created_at, updated_at";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self { pool })
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ============================================
    // Users
    // ============================================

    /// Insert a user. Returns `None` when the email is already registered.
    pub async fn create_user(&self, input: CreateUserRow) -> Result<Option<UserRow>> {
        let query = format!(
            r#"
            INSERT INTO users (id, email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(Uuid::now_v7())
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.password_hash)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list_users(&self) -> Result<Vec<UserRow>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    // ============================================
    // Events
    // ============================================

    /// Insert an event. Returns `None` when the name is already taken.
    pub async fn create_event(&self, input: CreateEventRow) -> Result<Option<EventRow>> {
        let query = format!(
            r#"
            INSERT INTO events (id, organizer_id, name, description, location, date, time, food_details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (name) DO NOTHING
            RETURNING {EVENT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(Uuid::now_v7())
            .bind(input.organizer_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.date)
            .bind(input.time)
            .bind(&input.food_details)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, EventRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn update_event(&self, id: Uuid, input: UpdateEventRow) -> Result<UpdateEventOutcome> {
        let query = format!(
            r#"
            UPDATE events
            SET
                name = $2,
                description = $3,
                location = $4,
                date = $5,
                time = $6,
                food_details = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.date)
            .bind(input.time)
            .bind(&input.food_details)
            .fetch_optional(&self.pool)
            .await;

        match result {
            Ok(Some(row)) => Ok(UpdateEventOutcome::Updated(row)),
            Ok(None) => Ok(UpdateEventOutcome::NotFound),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(UpdateEventOutcome::NameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_event(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

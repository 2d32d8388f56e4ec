// Event service: create/list food events, organizer-only update/delete

use std::sync::Arc;

use sparkbytes_core::{Event, User};
use tracing::Instrument;
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::api::events::EventRequest;
use crate::api::validation::{validate_event, ValidatedEvent};
use crate::storage::{CreateEventRow, EventRow, StorageBackend, UpdateEventOutcome, UpdateEventRow};

pub struct EventService {
    db: Arc<StorageBackend>,
}

impl EventService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Create an event owned by `organizer`
    pub async fn create(&self, organizer: &User, req: EventRequest) -> ServiceResult<Event> {
        let input = validate_event(&req)?;
        let span = tracing::info_span!(
            "events.create",
            "event.name" = %input.name,
            "event.organizer_id" = %organizer.id,
            "event.id" = tracing::field::Empty,
        );

        self.create_inner(organizer, input).instrument(span).await
    }

    async fn create_inner(&self, organizer: &User, input: ValidatedEvent) -> ServiceResult<Event> {
        let span = tracing::Span::current();

        let row = self
            .db
            .create_event(CreateEventRow {
                organizer_id: organizer.id,
                name: input.name,
                description: input.description,
                location: input.location,
                date: input.date,
                time: input.time,
                food_details: input.food_details,
            })
            .await?
            .ok_or(ServiceError::DuplicateEvent)?;

        span.record("event.id", row.id.to_string().as_str());
        tracing::info!(event_id = %row.id, "Event created");
        Ok(row_to_event(row))
    }

    /// All events, newest first
    pub async fn list(&self) -> ServiceResult<Vec<Event>> {
        let rows = self.db.list_events().await?;
        Ok(rows.into_iter().map(row_to_event).collect())
    }

    /// Replace the descriptive fields of an event the caller organizes
    pub async fn update(&self, user: &User, id: Uuid, req: EventRequest) -> ServiceResult<Event> {
        let input = validate_event(&req)?;
        self.ensure_organizer(user, id).await?;

        let outcome = self
            .db
            .update_event(
                id,
                UpdateEventRow {
                    name: input.name,
                    description: input.description,
                    location: input.location,
                    date: input.date,
                    time: input.time,
                    food_details: input.food_details,
                },
            )
            .await?;

        match outcome {
            UpdateEventOutcome::Updated(row) => {
                tracing::info!(event_id = %id, "Event updated");
                Ok(row_to_event(row))
            }
            UpdateEventOutcome::NotFound => Err(ServiceError::NotFound("Event")),
            UpdateEventOutcome::NameTaken => Err(ServiceError::DuplicateEvent),
        }
    }

    /// Delete an event the caller organizes
    pub async fn delete(&self, user: &User, id: Uuid) -> ServiceResult<()> {
        self.ensure_organizer(user, id).await?;

        if !self.db.delete_event(id).await? {
            return Err(ServiceError::NotFound("Event"));
        }
        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }

    async fn ensure_organizer(&self, user: &User, id: Uuid) -> ServiceResult<()> {
        let event = self
            .db
            .get_event(id)
            .await?
            .ok_or(ServiceError::NotFound("Event"))?;

        if event.organizer_id != user.id {
            tracing::warn!(event_id = %id, user_id = %user.id, "Non-organizer tried to modify event");
            return Err(ServiceError::forbidden(
                "Only the organizer can modify this event",
            ));
        }
        Ok(())
    }
}

fn row_to_event(row: EventRow) -> Event {
    Event {
        id: row.id,
        organizer_id: row.organizer_id,
        name: row.name,
        description: row.description,
        location: row.location,
        date: row.date,
        time: row.time,
        food_details: row.food_details,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::user::row_to_user;
    use crate::storage::CreateUserRow;

    async fn setup() -> (EventService, User, User) {
        let db = Arc::new(StorageBackend::in_memory());
        let mut users = Vec::new();
        for email in ["a@bu.edu", "b@bu.edu"] {
            let row = db
                .create_user(CreateUserRow {
                    email: email.to_string(),
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                    password_hash: "$argon2id$stub".to_string(),
                })
                .await
                .unwrap()
                .unwrap();
            users.push(row_to_user(row));
        }
        let other = users.pop().unwrap();
        let owner = users.pop().unwrap();
        (EventService::new(db), owner, other)
    }

    fn request(name: &str) -> EventRequest {
        EventRequest {
            name: Some(name.to_string()),
            description: Some("Leftover pizza".to_string()),
            location: Some("CDS 1101".to_string()),
            date: Some("2025-04-18".to_string()),
            time: Some("18:30".to_string()),
            food_details: Some("Vegetarian".to_string()),
        }
    }

    #[tokio::test]
    async fn test_created_event_is_listed() {
        let (service, owner, _) = setup().await;
        let event = service.create(&owner, request("Pizza")).await.unwrap();
        assert_eq!(event.organizer_id, owner.id);

        let events = service.list().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], event);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let (service, owner, other) = setup().await;
        service.create(&owner, request("Pizza")).await.unwrap();
        let err = service.create(&other, request("Pizza")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEvent));
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let (service, owner, _) = setup().await;
        let mut req = request("Pizza");
        req.description = None;
        let err = service.create(&owner, req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_only_organizer_can_modify() {
        let (service, owner, other) = setup().await;
        let event = service.create(&owner, request("Pizza")).await.unwrap();

        let err = service
            .update(&other, event.id, request("Stolen"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        let err = service.delete(&other, event.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let updated = service
            .update(&owner, event.id, request("Bagels"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Bagels");
        assert_eq!(updated.id, event.id);

        service.delete(&owner, event.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_event_is_not_found() {
        let (service, owner, _) = setup().await;
        let err = service.delete(&owner, Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Event")));
    }
}

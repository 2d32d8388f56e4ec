// Event domain types
//
// A food event posted by an organizer. Date and time are kept separate,
// the way organizers enter them.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A food-sharing event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Event {
    /// Unique identifier for the event.
    pub id: Uuid,
    /// ID of the user who created the event.
    pub organizer_id: Uuid,
    /// Event name. Unique across all events.
    #[cfg_attr(feature = "openapi", schema(example = "CS Club Pizza Night"))]
    pub name: String,
    /// What is happening and what is on offer.
    #[cfg_attr(feature = "openapi", schema(example = "Leftover pizza from the club meeting"))]
    pub description: String,
    /// Where to pick the food up.
    #[cfg_attr(feature = "openapi", schema(example = "CDS 1101"))]
    pub location: String,
    /// Calendar date of the event.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "2025-04-18"))]
    pub date: NaiveDate,
    /// Time of day the event starts.
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "18:30:00"))]
    pub time: NaiveTime,
    /// Free-form notes about the food (dietary info, quantities).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "Vegetarian options, about 20 slices"))]
    pub food_details: Option<String>,
    /// Timestamp when the event was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update.
    pub updated_at: DateTime<Utc>,
}

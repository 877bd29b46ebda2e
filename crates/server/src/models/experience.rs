//! Experience listing domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use beyond_core::{AccountId, ExperienceId};

/// A bookable experience listing (domain type).
#[derive(Debug, Clone)]
pub struct Experience {
    /// Storage-assigned row key (`_id` on the wire).
    pub id: Uuid,
    /// Public listing identifier, minted at creation.
    pub exp_id: ExperienceId,
    /// `user_id` of the owning account.
    pub owner_id: AccountId,
    /// Owner display name, snapshotted at creation time. Renaming the
    /// account does not propagate here.
    pub owner_name: String,
    /// Listing title.
    pub title: String,
    /// Price per person.
    pub price: Decimal,
    /// Free-form category label.
    pub category: String,
    /// Long description.
    pub description: String,
    /// Human-readable location.
    pub location: String,
    /// Maximum headcount.
    pub max_capacity: i32,
    /// Base64-encoded images, passed through as opaque strings.
    pub images: Vec<String>,
    /// Google Maps link.
    pub map_link: String,
    /// Aggregate rating, 0 until rated.
    pub rating: Decimal,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a listing, after owner resolution and image
/// validation in the service layer.
#[derive(Debug, Clone)]
pub struct NewExperience {
    pub exp_id: ExperienceId,
    pub owner_id: AccountId,
    pub owner_name: String,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub description: String,
    pub location: String,
    pub max_capacity: i32,
    pub images: Vec<String>,
    pub map_link: String,
}

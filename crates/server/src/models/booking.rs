//! Booking domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A reservation record linking an account to a listing (domain type).
///
/// `account_id` and `exp_id` are caller-supplied opaque strings, not typed
/// IDs: the store enforces no referential integrity for bookings, so a
/// booking can reference an account or listing that does not exist.
#[derive(Debug, Clone)]
pub struct Booking {
    /// Storage-assigned row key; doubles as the public booking identifier.
    pub id: Uuid,
    /// `user_id` of the booking account, as supplied by the caller.
    pub account_id: String,
    /// `exp_id` of the booked listing, as supplied by the caller.
    pub exp_id: String,
    /// Headcount, trusted verbatim (not checked against capacity).
    pub total_people: i32,
    /// Total price, trusted verbatim (not recomputed from the listing).
    pub total_price: Decimal,
    /// Travel date as an opaque string, not a structured date.
    pub date: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a booking, after field-presence validation.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub account_id: String,
    pub exp_id: String,
    pub total_people: i32,
    pub total_price: Decimal,
    pub date: String,
}

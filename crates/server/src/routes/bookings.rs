//! Booking route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::Booking;
use crate::services::{BookingService, bookings::CreateBooking};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Booking request body. Fields are optional so absence maps to the
/// uniform "All fields are required" error rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct BookExperienceRequest {
    #[serde(rename = "userId")]
    pub account_id: Option<String>,
    #[serde(rename = "expId")]
    pub exp_id: Option<String>,
    #[serde(rename = "totalPeople")]
    pub total_people: Option<i32>,
    #[serde(rename = "totalPrice")]
    pub total_price: Option<Decimal>,
    pub date: Option<String>,
}

impl From<BookExperienceRequest> for CreateBooking {
    fn from(req: BookExperienceRequest) -> Self {
        Self {
            account_id: req.account_id,
            exp_id: req.exp_id,
            total_people: req.total_people,
            total_price: req.total_price,
            date: req.date,
        }
    }
}

/// Booking response body.
#[derive(Debug, Serialize)]
pub struct BookExperienceResponse {
    pub message: String,
    #[serde(rename = "bookingId")]
    pub booking_id: Uuid,
}

/// Query parameters for the upcoming-bookings endpoint.
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// One upcoming booking.
///
/// The original projected fields (`status`, `image`) that were never part
/// of the booking schema, so its responses carried only the row id and the
/// date. We keep exactly that shape instead of inventing a schema.
#[derive(Debug, Serialize)]
pub struct UpcomingBooking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub date: String,
}

impl From<Booking> for UpcomingBooking {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            date: booking.date,
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book-experience", post(book))
        .route("/bookings/upcoming", get(upcoming))
}

async fn book(
    State(state): State<AppState>,
    Json(req): Json<BookExperienceRequest>,
) -> Result<(StatusCode, Json<BookExperienceResponse>)> {
    let booking = BookingService::new(state.pool()).create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookExperienceResponse {
            message: "Booking successful".to_owned(),
            booking_id: booking.id,
        }),
    ))
}

async fn upcoming(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Vec<UpcomingBooking>>> {
    let bookings = BookingService::new(state.pool())
        .upcoming(&query.user_id)
        .await?;

    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_request_tolerates_missing_fields() {
        let req: BookExperienceRequest = serde_json::from_value(serde_json::json!({
            "userId": "u-1",
            "expId": "e-1"
        }))
        .unwrap();

        assert!(req.total_people.is_none());
        assert!(req.date.is_none());
    }

    #[test]
    fn test_upcoming_projection_is_id_and_date_only() {
        let booking = Booking {
            id: Uuid::new_v4(),
            account_id: "u-1".to_owned(),
            exp_id: "e-1".to_owned(),
            total_people: 2,
            total_price: Decimal::new(9900, 2),
            date: "2026-09-12".to_owned(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(UpcomingBooking::from(booking)).unwrap();

        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("_id"));
        assert!(obj.contains_key("date"));
    }
}

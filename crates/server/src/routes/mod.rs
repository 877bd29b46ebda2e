//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database round-trip)
//!
//! # Accounts
//! POST   /register                  - Register (201 {message, userId})
//! POST   /login                     - Login (200 {userId}, no session token)
//! GET    /user/{userId}             - Profile (password never returned)
//! GET    /users                     - All accounts, password hashes stripped
//! DELETE /delete-user/{userId}      - Hard delete, no cascade
//!
//! # Experiences
//! POST   /upload-experience         - Create listing (201 {message, experienceId})
//! GET    /get-experiences/{userId}  - Listings by owner, full records
//! GET    /experiences               - All listings, unfiltered
//! GET    /experience/{id}           - One listing by row key, narrowed projection
//! POST   /search                    - Substring search over title/description
//! DELETE /delete-experience/{expId} - Hard delete
//!
//! # Bookings
//! POST /book-experience             - Create booking (201 {message, bookingId})
//! GET  /bookings/upcoming?userId=   - Bookings dated now or later
//! ```
//!
//! JSON field names follow the original wire contract (`userId`, `expId`,
//! `gmapsLink`, `maxPeople`, `_id`, ...), so existing clients keep working.

pub mod accounts;
pub mod bookings;
pub mod experiences;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// A bare `{"message": "..."}` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(accounts::routes())
        .merge(experiences::routes())
        .merge(bookings::routes())
}

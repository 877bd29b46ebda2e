//! Booking service: creation and upcoming lookup.

use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use crate::db::{BookingRepository, RepositoryError};
use crate::models::{Booking, NewBooking};

/// Errors surfaced by booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// One or more of the five required fields is absent.
    #[error("all fields are required")]
    MissingFields,

    /// Repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Input for creating a booking. Every field is optional at the wire level
/// so presence can be validated with a single uniform error, the way the
/// original service did.
#[derive(Debug, Default)]
pub struct CreateBooking {
    pub account_id: Option<String>,
    pub exp_id: Option<String>,
    pub total_people: Option<i32>,
    pub total_price: Option<Decimal>,
    pub date: Option<String>,
}

/// Booking service.
pub struct BookingService<'a> {
    bookings: BookingRepository<'a>,
}

impl<'a> BookingService<'a> {
    /// Create a new booking service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool),
        }
    }

    /// Create a booking from caller-supplied values, trusted verbatim.
    ///
    /// There is no referential check against accounts or listings, no
    /// capacity check, and no price recomputation; only field presence is
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::MissingFields` if any field is absent or an
    /// empty string.
    pub async fn create(&self, input: CreateBooking) -> Result<Booking, BookingError> {
        let new = validate_booking(input)?;

        Ok(self.bookings.create(&new).await?)
    }

    /// List bookings for an account whose date is on or after the current
    /// moment.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Repository` if the query fails.
    pub async fn upcoming(&self, account_id: &str) -> Result<Vec<Booking>, BookingError> {
        let cutoff = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        Ok(self.bookings.list_upcoming(account_id, &cutoff).await?)
    }
}

/// Check all five fields are present (strings also non-empty) and assemble
/// the insert payload.
fn validate_booking(input: CreateBooking) -> Result<NewBooking, BookingError> {
    let account_id = input.account_id.filter(|s| !s.is_empty());
    let exp_id = input.exp_id.filter(|s| !s.is_empty());
    let date = input.date.filter(|s| !s.is_empty());

    match (
        account_id,
        exp_id,
        input.total_people,
        input.total_price,
        date,
    ) {
        (Some(account_id), Some(exp_id), Some(total_people), Some(total_price), Some(date)) => {
            Ok(NewBooking {
                account_id,
                exp_id,
                total_people,
                total_price,
                date,
            })
        }
        _ => Err(BookingError::MissingFields),
    }
}

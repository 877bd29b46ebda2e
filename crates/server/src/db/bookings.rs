//! Booking repository.
//!
//! Bookings deliberately carry no foreign keys: `account_id` and `exp_id`
//! are stored as the caller supplied them, so a booking can reference an
//! account or listing that was never created (or was since deleted). The
//! original service behaved the same way.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::RepositoryError;
use crate::models::{Booking, NewBooking};

/// Row type for the `booking` table.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    account_id: String,
    exp_id: String,
    total_people: i32,
    total_price: Decimal,
    travel_date: String,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            exp_id: row.exp_id,
            total_people: row.total_people,
            total_price: row.total_price,
            date: row.travel_date,
            created_at: row.created_at,
        }
    }
}

/// Repository for booking database operations.
pub struct BookingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepository<'a> {
    /// Create a new booking repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new booking with a server-assigned creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewBooking) -> Result<Booking, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(
            "INSERT INTO booking (account_id, exp_id, total_people, total_price, travel_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, account_id, exp_id, total_people, total_price,
                       travel_date, created_at",
        )
        .bind(&new.account_id)
        .bind(&new.exp_id)
        .bind(new.total_people)
        .bind(new.total_price)
        .bind(&new.date)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List bookings for an account whose travel date is on or after the
    /// cutoff, soonest first.
    ///
    /// Dates are opaque strings; the comparison is lexicographic, which is
    /// correct for the ISO-formatted dates clients send.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_upcoming(
        &self,
        account_id: &str,
        cutoff: &str,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, account_id, exp_id, total_people, total_price,
                    travel_date, created_at
             FROM booking
             WHERE account_id = $1 AND travel_date >= $2
             ORDER BY travel_date",
        )
        .bind(account_id)
        .bind(cutoff)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

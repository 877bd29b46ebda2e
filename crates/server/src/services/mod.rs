//! Business services sitting between the HTTP routes and the repositories.
//!
//! Each service owns the validation and error vocabulary for one record
//! collection; handlers stay thin and repositories stay dumb.

pub mod accounts;
pub mod bookings;
pub mod experiences;

pub use accounts::{AccountError, AccountService};
pub use bookings::{BookingError, BookingService};
pub use experiences::{ExperienceError, ExperienceService};

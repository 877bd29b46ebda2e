//! Domain types for the marketplace.
//!
//! These types represent validated domain objects separate from database
//! row types and from the wire DTOs in `routes`.

pub mod account;
pub mod booking;
pub mod experience;

pub use account::Account;
pub use booking::{Booking, NewBooking};
pub use experience::{Experience, NewExperience};

//! Account domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use beyond_core::{AccountId, Email};

/// A registered marketplace user (domain type).
///
/// The password hash is deliberately not part of this type; it only ever
/// travels through the login path in the repository.
#[derive(Debug, Clone)]
pub struct Account {
    /// Storage-assigned row key.
    pub id: Uuid,
    /// Public account identifier, minted at registration. This is the
    /// credential callers hold onto after login.
    pub user_id: AccountId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

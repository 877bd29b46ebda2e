//! Account repository for database operations.
//!
//! Queries are runtime-checked (`sqlx::query_as`) so the workspace builds
//! without a live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use beyond_core::{AccountId, Email};

use super::{RepositoryError, is_unique_violation};
use crate::models::Account;

/// Row type for the `account` table.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    /// Convert a row into the domain type, re-validating the stored email.
    fn into_account(self) -> Result<Account, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Account {
            id: self.id,
            user_id: AccountId::new(self.user_id),
            name: self.name,
            email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email (or, improbably,
    /// the generated `user_id`) already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: AccountId,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO account (user_id, name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, name, email, created_at, updated_at",
        )
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_account()
    }

    /// Get an account by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, user_id, name, email, created_at, updated_at
             FROM account WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    /// Get an account by its public `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user_id(
        &self,
        user_id: AccountId,
    ) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, user_id, name, email, created_at, updated_at
             FROM account WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    /// Get an account and its password hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct HashRow {
            #[sqlx(flatten)]
            account: AccountRow,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, HashRow>(
            "SELECT id, user_id, name, email, created_at, updated_at, password_hash
             FROM account WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Ok((r.account.into_account()?, r.password_hash)))
            .transpose()
    }

    /// List every account, password hashes excluded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, user_id, name, email, created_at, updated_at
             FROM account ORDER BY created_at",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    /// Delete an account by its public `user_id`.
    ///
    /// Returns `false` when no such account existed. Listings and bookings
    /// referencing the account are left in place (no cascade).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_user_id(&self, user_id: AccountId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM account WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

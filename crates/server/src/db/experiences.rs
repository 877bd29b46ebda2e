//! Experience listing repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use beyond_core::{AccountId, ExperienceId};

use super::{RepositoryError, is_unique_violation};
use crate::models::{Experience, NewExperience};

/// Row type for the `experience` table.
#[derive(Debug, sqlx::FromRow)]
struct ExperienceRow {
    id: Uuid,
    exp_id: Uuid,
    owner_id: Uuid,
    owner_name: String,
    title: String,
    price: Decimal,
    category: String,
    description: String,
    location: String,
    max_capacity: i32,
    images: Vec<String>,
    map_link: String,
    rating: Decimal,
    created_at: DateTime<Utc>,
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Self {
            id: row.id,
            exp_id: ExperienceId::new(row.exp_id),
            owner_id: AccountId::new(row.owner_id),
            owner_name: row.owner_name,
            title: row.title,
            price: row.price,
            category: row.category,
            description: row.description,
            location: row.location,
            max_capacity: row.max_capacity,
            images: row.images,
            map_link: row.map_link,
            rating: row.rating,
            created_at: row.created_at,
        }
    }
}

/// Repository for experience listing database operations.
pub struct ExperienceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ExperienceRepository<'a> {
    /// Create a new experience repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on an `exp_id` collision (the
    /// generator makes this vanishingly unlikely).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewExperience) -> Result<Experience, RepositoryError> {
        let row = sqlx::query_as::<_, ExperienceRow>(
            "INSERT INTO experience
                 (exp_id, owner_id, owner_name, title, price, category,
                  description, location, max_capacity, images, map_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING id, exp_id, owner_id, owner_name, title, price, category,
                       description, location, max_capacity, images, map_link,
                       rating, created_at",
        )
        .bind(new.exp_id)
        .bind(new.owner_id)
        .bind(&new.owner_name)
        .bind(&new.title)
        .bind(new.price)
        .bind(&new.category)
        .bind(&new.description)
        .bind(&new.location)
        .bind(new.max_capacity)
        .bind(&new.images)
        .bind(&new.map_link)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return RepositoryError::Conflict("listing id already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// List every listing owned by the given account, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(
        &self,
        owner_id: AccountId,
    ) -> Result<Vec<Experience>, RepositoryError> {
        let rows = sqlx::query_as::<_, ExperienceRow>(
            "SELECT id, exp_id, owner_id, owner_name, title, price, category,
                    description, location, max_capacity, images, map_link,
                    rating, created_at
             FROM experience WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List every listing, unfiltered and unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Experience>, RepositoryError> {
        let rows = sqlx::query_as::<_, ExperienceRow>(
            "SELECT id, exp_id, owner_id, owner_name, title, price, category,
                    description, location, max_capacity, images, map_link,
                    rating, created_at
             FROM experience ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a listing by its storage row key (the `_id` clients navigate with).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Experience>, RepositoryError> {
        let row = sqlx::query_as::<_, ExperienceRow>(
            "SELECT id, exp_id, owner_id, owner_name, title, price, category,
                    description, location, max_capacity, images, map_link,
                    rating, created_at
             FROM experience WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Case-insensitive substring search over title and description.
    ///
    /// `pattern` must already be a LIKE pattern with metacharacters escaped
    /// (see the service layer); backslash is the default escape character.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, pattern: &str) -> Result<Vec<Experience>, RepositoryError> {
        let rows = sqlx::query_as::<_, ExperienceRow>(
            "SELECT id, exp_id, owner_id, owner_name, title, price, category,
                    description, location, max_capacity, images, map_link,
                    rating, created_at
             FROM experience
             WHERE title ILIKE $1 OR description ILIKE $1
             ORDER BY created_at DESC",
        )
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete a listing by its public `exp_id`.
    ///
    /// Returns `false` when no such listing existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_exp_id(&self, exp_id: ExperienceId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM experience WHERE exp_id = $1")
            .bind(exp_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

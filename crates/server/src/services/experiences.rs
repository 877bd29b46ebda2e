//! Experience listing service: creation, lookup, search, deletion.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use beyond_core::{AccountId, ExperienceId};

use crate::db::{AccountRepository, ExperienceRepository, RepositoryError};
use crate::models::{Experience, NewExperience};

/// Errors surfaced by listing operations.
#[derive(Debug, Error)]
pub enum ExperienceError {
    /// Upload referenced an owner `userId` that does not resolve.
    #[error("owner not found")]
    OwnerNotFound,

    /// An element of `images` is not a base64-encoded string.
    #[error("invalid image format")]
    InvalidImage,

    /// Lookup or delete referenced a nonexistent listing.
    #[error("experience not found")]
    NotFound,

    /// Repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Input for creating a listing, as accepted from the wire.
#[derive(Debug)]
pub struct CreateExperience {
    /// Public `userId` of the owner, unparsed.
    pub owner_id: String,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub description: String,
    pub location: String,
    pub max_capacity: i32,
    pub map_link: String,
    pub images: Vec<String>,
}

/// Experience listing service.
pub struct ExperienceService<'a> {
    experiences: ExperienceRepository<'a>,
    accounts: AccountRepository<'a>,
}

impl<'a> ExperienceService<'a> {
    /// Create a new experience service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            experiences: ExperienceRepository::new(pool),
            accounts: AccountRepository::new(pool),
        }
    }

    /// Create a listing, snapshotting the owner's display name.
    ///
    /// The snapshot is a deliberate read optimization: renaming the account
    /// later does not propagate to existing listings.
    ///
    /// # Errors
    ///
    /// Returns `ExperienceError::OwnerNotFound` if `owner_id` does not
    /// resolve to an account.
    /// Returns `ExperienceError::InvalidImage` if any image fails base64
    /// validation.
    pub async fn create(&self, input: CreateExperience) -> Result<ExperienceId, ExperienceError> {
        let owner_id = input
            .owner_id
            .parse::<AccountId>()
            .map_err(|_| ExperienceError::OwnerNotFound)?;

        let owner = self
            .accounts
            .get_by_user_id(owner_id)
            .await?
            .ok_or(ExperienceError::OwnerNotFound)?;

        if !input.images.iter().all(|img| is_encoded_image(img)) {
            return Err(ExperienceError::InvalidImage);
        }

        let new = NewExperience {
            exp_id: ExperienceId::generate(),
            owner_id: owner.user_id,
            owner_name: owner.name,
            title: input.title,
            price: input.price,
            category: input.category,
            description: input.description,
            location: input.location,
            max_capacity: input.max_capacity,
            images: input.images,
            map_link: input.map_link,
        };

        let experience = self.experiences.create(&new).await?;

        Ok(experience.exp_id)
    }

    /// List every listing owned by the given public `userId`.
    ///
    /// An unparseable owner id matches nothing and yields an empty list,
    /// like any other unknown owner.
    ///
    /// # Errors
    ///
    /// Returns `ExperienceError::Repository` if the query fails.
    pub async fn by_owner(&self, owner_id: &str) -> Result<Vec<Experience>, ExperienceError> {
        let Ok(owner_id) = owner_id.parse::<AccountId>() else {
            return Ok(Vec::new());
        };

        Ok(self.experiences.list_by_owner(owner_id).await?)
    }

    /// List every listing.
    ///
    /// # Errors
    ///
    /// Returns `ExperienceError::Repository` if the query fails.
    pub async fn all(&self) -> Result<Vec<Experience>, ExperienceError> {
        Ok(self.experiences.list_all().await?)
    }

    /// Fetch a listing by its storage row key.
    ///
    /// A path segment that is not a valid row id cannot name any listing,
    /// so it reports not-found rather than a server error.
    ///
    /// # Errors
    ///
    /// Returns `ExperienceError::NotFound` if no such listing exists.
    pub async fn get(&self, id: &str) -> Result<Experience, ExperienceError> {
        let id = id
            .parse::<Uuid>()
            .map_err(|_| ExperienceError::NotFound)?;

        self.experiences
            .get_by_id(id)
            .await?
            .ok_or(ExperienceError::NotFound)
    }

    /// Case-insensitive substring search over title and description.
    ///
    /// Pure predicate, logical OR across the two fields; no tokenization,
    /// stemming, or ranking.
    ///
    /// # Errors
    ///
    /// Returns `ExperienceError::Repository` if the query fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Experience>, ExperienceError> {
        Ok(self.experiences.search(&like_pattern(query)).await?)
    }

    /// Delete a listing by its public `expId`.
    ///
    /// # Errors
    ///
    /// Returns `ExperienceError::NotFound` if no such listing exists.
    pub async fn delete(&self, exp_id: &str) -> Result<(), ExperienceError> {
        let exp_id = exp_id
            .parse::<ExperienceId>()
            .map_err(|_| ExperienceError::NotFound)?;

        if self.experiences.delete_by_exp_id(exp_id).await? {
            Ok(())
        } else {
            Err(ExperienceError::NotFound)
        }
    }
}

/// Turn a raw query into a substring LIKE pattern, escaping the LIKE
/// metacharacters so they match literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}

/// Whether a string is a plausible base64-encoded image.
///
/// Images are opaque to this service (no transcoding or sniffing); the
/// check is that the payload - after an optional `data:...;base64,` data-URL
/// prefix - is non-empty and decodes as standard base64.
fn is_encoded_image(s: &str) -> bool {
    let payload = s.split_once("base64,").map_or(s, |(_, rest)| rest);

    !payload.is_empty() && BASE64.decode(payload.trim()).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_in_wildcards() {
        assert_eq!(like_pattern("kayak"), "%kayak%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn test_like_pattern_empty_query_matches_everything() {
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_is_encoded_image_accepts_plain_base64() {
        assert!(is_encoded_image("aGVsbG8gd29ybGQ="));
    }

    #[test]
    fn test_is_encoded_image_accepts_data_url() {
        assert!(is_encoded_image("data:image/png;base64,aGVsbG8="));
    }

    #[test]
    fn test_is_encoded_image_rejects_empty_and_garbage() {
        assert!(!is_encoded_image(""));
        assert!(!is_encoded_image("data:image/png;base64,"));
        assert!(!is_encoded_image("not base64 at all!!!"));
    }
}

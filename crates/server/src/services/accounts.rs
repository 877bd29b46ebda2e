//! Account service: registration, login, profile, listing, deletion.
//!
//! Login returns the bare `userId` with no session token, expiry, or
//! rotation; callers hold onto it as their sole credential. That is the
//! documented contract of this service, not an oversight.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use beyond_core::{AccountId, Email, EmailError};

use crate::db::{AccountRepository, RepositoryError};
use crate::models::Account;

/// Errors surfaced by account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Registration email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Registration email is already taken.
    #[error("user already exists")]
    EmailTaken,

    /// Login email does not match any account.
    #[error("user not found")]
    UnknownEmail,

    /// Login password does not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Profile fetch or delete referenced a nonexistent account.
    #[error("account not found")]
    NotFound,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Account service.
///
/// Handles registration, login, profile fetch, list-all, and deletion.
pub struct AccountService<'a> {
    accounts: AccountRepository<'a>,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
        }
    }

    /// Register a new account and return its minted `userId`.
    ///
    /// The duplicate check is advisory; the store's unique index on email
    /// is what actually decides concurrent races, and its violation maps
    /// to the same error.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` if the email is malformed.
    /// Returns `AccountError::EmailTaken` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountId, AccountError> {
        let email = Email::parse(email)?;

        if self.accounts.get_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = hash_password(password)?;
        let user_id = AccountId::generate();

        let account = self
            .accounts
            .create(user_id, name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AccountError::EmailTaken,
                other => AccountError::Repository(other),
            })?;

        Ok(account.user_id)
    }

    /// Login with email and password, returning the account's `userId`.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UnknownEmail` if no account matches the email.
    /// Returns `AccountError::InvalidCredentials` if the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccountId, AccountError> {
        // A malformed email cannot belong to any account.
        let Ok(email) = Email::parse(email) else {
            return Err(AccountError::UnknownEmail);
        };

        let (account, password_hash) = self
            .accounts
            .get_password_hash(&email)
            .await?
            .ok_or(AccountError::UnknownEmail)?;

        verify_password(password, &password_hash)?;

        Ok(account.user_id)
    }

    /// Fetch an account by its public `userId`.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if no such account exists.
    pub async fn get(&self, user_id: AccountId) -> Result<Account, AccountError> {
        self.accounts
            .get_by_user_id(user_id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    /// List every account (password hashes never leave the repository).
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.accounts.list_all().await?)
    }

    /// Delete an account by its public `userId`.
    ///
    /// The account's listings and bookings are not cascaded.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if no such account exists.
    pub async fn delete(&self, user_id: AccountId) -> Result<(), AccountError> {
        if self.accounts.delete_by_user_id(user_id).await? {
            Ok(())
        } else {
            Err(AccountError::NotFound)
        }
    }
}

/// Hash a password with Argon2 and a random salt.
fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::Hash(e.to_string()))
}

/// Verify a password against a stored Argon2 hash.
///
/// An unparseable stored hash is reported as bad credentials rather than a
/// server error, matching how the original treated unverifiable records.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AccountError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AccountError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AccountError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}

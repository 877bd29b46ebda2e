//! Account route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beyond_core::AccountId;

use crate::error::{AppError, Result};
use crate::models::Account;
use crate::routes::MessageResponse;
use crate::services::AccountService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Registration response body.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: AccountId,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body: the bare `userId`, the caller's sole credential.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "userId")]
    pub user_id: AccountId,
}

/// Profile response body. The stored record has no phone field; the
/// original emitted a constant placeholder and clients rely on it.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "userId")]
    pub user_id: AccountId,
}

impl From<Account> for ProfileResponse {
    fn from(account: Account) -> Self {
        Self {
            name: account.name,
            email: account.email.into_inner(),
            phone: "N/A".to_owned(),
            user_id: account.user_id,
        }
    }
}

/// One account in the list-all response, password hash stripped.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "userId")]
    pub user_id: AccountId,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email.into_inner(),
            user_id: account.user_id,
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/user/{user_id}", get(profile))
        .route("/users", get(list))
        .route("/delete-user/{user_id}", delete(remove))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let user_id = AccountService::new(state.pool())
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_owned(),
            user_id,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user_id = AccountService::new(state.pool())
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(LoginResponse { user_id }))
}

async fn profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>> {
    let user_id = parse_user_id(&user_id)?;
    let account = AccountService::new(state.pool()).get(user_id).await?;

    Ok(Json(account.into()))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<AccountSummary>>> {
    let accounts = AccountService::new(state.pool()).list().await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

async fn remove(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let user_id = parse_user_id(&user_id)?;
    AccountService::new(state.pool()).delete(user_id).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// A path segment that is not a valid id cannot name any account.
fn parse_user_id(raw: &str) -> Result<AccountId> {
    raw.parse::<AccountId>()
        .map_err(|_| AppError::NotFound("User not found".to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    use beyond_core::Email;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            user_id: AccountId::generate(),
            name: "Asha".to_owned(),
            email: Email::parse("asha@example.com").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_wire_shape() {
        let account = account();
        let user_id = account.user_id;
        let json = serde_json::to_value(ProfileResponse::from(account)).unwrap();

        assert_eq!(json["phone"], "N/A");
        assert_eq!(json["userId"], user_id.to_string());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_summary_uses_mongo_style_id_key() {
        let json = serde_json::to_value(AccountSummary::from(account())).unwrap();

        assert!(json.get("_id").is_some());
        assert!(json.get("id").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_parse_user_id_rejects_garbage_as_not_found() {
        assert!(matches!(
            parse_user_id("1700000000000"),
            Err(AppError::NotFound(_))
        ));
    }
}

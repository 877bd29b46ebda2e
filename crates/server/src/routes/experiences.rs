//! Experience listing route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beyond_core::{AccountId, ExperienceId};

use crate::error::Result;
use crate::models::Experience;
use crate::routes::MessageResponse;
use crate::services::{ExperienceService, experiences::CreateExperience};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Listing upload request body (original wire names: `name` is the title,
/// `type` the category, `maxPeople` the capacity, `gmapsLink` the map link).
#[derive(Debug, Deserialize)]
pub struct UploadExperienceRequest {
    #[serde(rename = "userId")]
    pub owner_id: String,
    #[serde(rename = "name")]
    pub title: String,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "maxPeople")]
    pub max_capacity: i32,
    #[serde(rename = "gmapsLink")]
    pub map_link: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<UploadExperienceRequest> for CreateExperience {
    fn from(req: UploadExperienceRequest) -> Self {
        Self {
            owner_id: req.owner_id,
            title: req.title,
            price: req.price,
            category: req.category,
            description: req.description,
            location: req.location,
            max_capacity: req.max_capacity,
            map_link: req.map_link,
            images: req.images,
        }
    }
}

/// Listing upload response body.
#[derive(Debug, Serialize)]
pub struct UploadExperienceResponse {
    pub message: String,
    #[serde(rename = "experienceId")]
    pub experience_id: ExperienceId,
}

/// Search request body.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// A full listing record, as returned by the list endpoints.
#[derive(Debug, Serialize)]
pub struct ExperienceDoc {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub owner_id: AccountId,
    #[serde(rename = "userName")]
    pub owner_name: String,
    pub name: String,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "maxPeople")]
    pub max_capacity: i32,
    pub images: Vec<String>,
    #[serde(rename = "gmapsLink")]
    pub map_link: String,
    #[serde(rename = "expId")]
    pub exp_id: ExperienceId,
    pub rating: Decimal,
}

impl From<Experience> for ExperienceDoc {
    fn from(exp: Experience) -> Self {
        Self {
            id: exp.id,
            owner_id: exp.owner_id,
            owner_name: exp.owner_name,
            name: exp.title,
            price: exp.price,
            category: exp.category,
            description: exp.description,
            location: exp.location,
            max_capacity: exp.max_capacity,
            images: exp.images,
            map_link: exp.map_link,
            exp_id: exp.exp_id,
            rating: exp.rating,
        }
    }
}

/// The narrower projection served by detail and search: owner info and
/// category are deliberately excluded.
#[derive(Debug, Serialize)]
pub struct ExperienceCard {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub location: String,
    #[serde(rename = "gmapsLink")]
    pub map_link: String,
    #[serde(rename = "maxPeople")]
    pub max_capacity: i32,
    pub price: Decimal,
    pub rating: Decimal,
}

impl From<Experience> for ExperienceCard {
    fn from(exp: Experience) -> Self {
        Self {
            id: exp.id,
            name: exp.title,
            description: exp.description,
            images: exp.images,
            location: exp.location,
            map_link: exp.map_link,
            max_capacity: exp.max_capacity,
            price: exp.price,
            rating: exp.rating,
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload-experience", post(upload))
        .route("/get-experiences/{user_id}", get(by_owner))
        .route("/experiences", get(all))
        .route("/experience/{id}", get(detail))
        .route("/search", post(search))
        .route("/delete-experience/{exp_id}", delete(remove))
}

async fn upload(
    State(state): State<AppState>,
    Json(req): Json<UploadExperienceRequest>,
) -> Result<(StatusCode, Json<UploadExperienceResponse>)> {
    let experience_id = ExperienceService::new(state.pool())
        .create(req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadExperienceResponse {
            message: "Experience uploaded successfully".to_owned(),
            experience_id,
        }),
    ))
}

async fn by_owner(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ExperienceDoc>>> {
    let experiences = ExperienceService::new(state.pool())
        .by_owner(&user_id)
        .await?;

    Ok(Json(experiences.into_iter().map(Into::into).collect()))
}

async fn all(State(state): State<AppState>) -> Result<Json<Vec<ExperienceDoc>>> {
    let experiences = ExperienceService::new(state.pool()).all().await?;

    Ok(Json(experiences.into_iter().map(Into::into).collect()))
}

async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExperienceCard>> {
    let experience = ExperienceService::new(state.pool()).get(&id).await?;

    Ok(Json(experience.into()))
}

async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Vec<ExperienceCard>>> {
    let experiences = ExperienceService::new(state.pool())
        .search(&req.query)
        .await?;

    Ok(Json(experiences.into_iter().map(Into::into).collect()))
}

async fn remove(
    State(state): State<AppState>,
    Path(exp_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    ExperienceService::new(state.pool()).delete(&exp_id).await?;

    Ok(Json(MessageResponse::new(
        "Experience deleted successfully",
    )))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn experience() -> Experience {
        Experience {
            id: Uuid::new_v4(),
            exp_id: ExperienceId::generate(),
            owner_id: AccountId::generate(),
            owner_name: "Asha".to_owned(),
            title: "Sunrise kayak tour".to_owned(),
            price: Decimal::new(4500, 2),
            category: "Adventure".to_owned(),
            description: "Paddle out before dawn.".to_owned(),
            location: "Lisbon".to_owned(),
            max_capacity: 8,
            images: vec!["aGVsbG8=".to_owned()],
            map_link: "https://maps.example/abc".to_owned(),
            rating: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_upload_request_uses_original_wire_names() {
        let req: UploadExperienceRequest = serde_json::from_value(serde_json::json!({
            "userId": "u-1",
            "name": "Sunrise kayak tour",
            "price": 45.0,
            "type": "Adventure",
            "description": "Paddle out before dawn.",
            "location": "Lisbon",
            "maxPeople": 8,
            "gmapsLink": "https://maps.example/abc"
        }))
        .unwrap();

        assert_eq!(req.title, "Sunrise kayak tour");
        assert_eq!(req.category, "Adventure");
        assert_eq!(req.max_capacity, 8);
        // images defaults to empty when omitted
        assert!(req.images.is_empty());
    }

    #[test]
    fn test_full_doc_wire_shape() {
        let json = serde_json::to_value(ExperienceDoc::from(experience())).unwrap();

        for key in [
            "_id",
            "userId",
            "userName",
            "name",
            "price",
            "type",
            "maxPeople",
            "gmapsLink",
            "expId",
            "rating",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_card_projection_excludes_owner_and_category() {
        let json = serde_json::to_value(ExperienceCard::from(experience())).unwrap();

        assert!(json.get("_id").is_some());
        assert!(json.get("userId").is_none());
        assert!(json.get("userName").is_none());
        assert!(json.get("type").is_none());
        assert!(json.get("expId").is_none());
        assert!(json.get("rating").is_some());
    }
}

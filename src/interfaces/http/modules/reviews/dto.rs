//! Review DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::review::{ReviewFilter, UpdateReviewDto};
use crate::domain::Review;
use crate::shared::PageRequest;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: i32,
    pub rental_id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            rental_id: r.rental_id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub rental_id: i32,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(min = 10, max = 2000, message = "comment must be at least 10 characters"))]
    pub comment: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    #[validate(length(min = 10, max = 2000, message = "comment must be at least 10 characters"))]
    pub comment: Option<String>,
}

impl From<UpdateReviewRequest> for UpdateReviewDto {
    fn from(r: UpdateReviewRequest) -> Self {
        Self {
            rating: r.rating,
            comment: r.comment.map(|c| c.trim().to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListReviewsParams {
    pub rental_id: Option<i32>,
    pub user_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<ListReviewsParams> for ReviewFilter {
    fn from(p: ListReviewsParams) -> Self {
        Self {
            rental_id: p.rental_id,
            user_id: p.user_id,
            vehicle_id: p.vehicle_id,
            page: PageRequest::new(p.page, p.limit),
        }
    }
}

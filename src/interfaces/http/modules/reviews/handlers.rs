//! Review API handlers. Reading is public, writing needs a token.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateReviewRequest, ListReviewsParams, ReviewDto, UpdateReviewRequest};
use crate::application::ReviewService;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct ReviewHandlerState {
    pub review_service: Arc<ReviewService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "Reviews",
    params(ListReviewsParams),
    responses(
        (status = 200, description = "Review list", body = ApiResponse<PaginatedResponse<ReviewDto>>)
    )
)]
pub async fn list_reviews(
    State(state): State<ReviewHandlerState>,
    Query(params): Query<ListReviewsParams>,
) -> ApiResult<PaginatedResponse<ReviewDto>> {
    let reviews = state
        .review_service
        .list(params.into())
        .await
        .map_err(domain_error)?;
    ok(PaginatedResponse::from_result(reviews))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review details", body = ApiResponse<ReviewDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_review(
    State(state): State<ReviewHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<ReviewDto> {
    let review = state.review_service.get(id).await.map_err(domain_error)?;
    ok(review.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<ReviewDto>),
        (status = 403, description = "Rental belongs to another user"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn create_review(
    State(state): State<ReviewHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewDto>>), ApiError> {
    let review = state
        .review_service
        .create(
            auth_user.actor(),
            request.rental_id,
            request.rating,
            request.comment,
        )
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReviewDto::from(review))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewDto>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_review(
    State(state): State<ReviewHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> ApiResult<ReviewDto> {
    let review = state
        .review_service
        .update(auth_user.actor(), id, request.into())
        .await
        .map_err(domain_error)?;
    ok(review.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_review(
    State(state): State<ReviewHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state
        .review_service
        .delete(auth_user.actor(), id)
        .await
        .map_err(domain_error)?;
    ok(())
}

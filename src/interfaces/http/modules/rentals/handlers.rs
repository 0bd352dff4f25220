//! Rental API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    BookingResponse, CreateRentalRequest, ListRentalsParams, RentalDto, UpdateRentalRequest,
};
use crate::application::{BookingRequest, BookingService, RentalService};
use crate::domain::RentalTier;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct RentalHandlerState {
    pub rental_service: Arc<RentalService>,
    pub booking_service: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/rentals",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    request_body = CreateRentalRequest,
    responses(
        (status = 201, description = "Rental booked; payment may be null with a warning", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Vehicle has no price for the tier"),
        (status = 403, description = "Booking for another user requires admin"),
        (status = 404, description = "Vehicle or user not found")
    )
)]
pub async fn create_rental(
    State(state): State<RentalHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateRentalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), ApiError> {
    let renter = match request.user_id {
        Some(user_id) if user_id != auth_user.user_id => {
            auth_user.actor().ensure_admin().map_err(domain_error)?;
            user_id
        }
        _ => auth_user.user_id,
    };

    let outcome = state
        .booking_service
        .book(BookingRequest {
            user_id: renter,
            vehicle_id: request.vehicle_id,
            tier: request
                .tier
                .as_deref()
                .map(RentalTier::parse_or_daily)
                .unwrap_or_default(),
            start_time: request.start_time,
            pickup_city: request.pickup_city,
            pickup_detail: request.pickup_detail,
        })
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingResponse::from(outcome))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(ListRentalsParams),
    responses(
        (status = 200, description = "Rentals visible to the caller", body = ApiResponse<PaginatedResponse<RentalDto>>)
    )
)]
pub async fn list_rentals(
    State(state): State<RentalHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(params): Query<ListRentalsParams>,
) -> ApiResult<PaginatedResponse<RentalDto>> {
    let filter = params.into_filter().map_err(domain_error)?;
    let rentals = state
        .rental_service
        .list(auth_user.actor(), filter)
        .await
        .map_err(domain_error)?;
    ok(PaginatedResponse::from_result(rentals))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/{id}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental details", body = ApiResponse<RentalDto>),
        (status = 403, description = "Rental belongs to another user"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_rental(
    State(state): State<RentalHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<RentalDto> {
    let rental = state
        .rental_service
        .get(auth_user.actor(), id)
        .await
        .map_err(domain_error)?;
    ok(rental.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/rentals/{id}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    request_body = UpdateRentalRequest,
    responses(
        (status = 200, description = "Rental updated", body = ApiResponse<RentalDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_rental(
    State(state): State<RentalHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRentalRequest>,
) -> ApiResult<RentalDto> {
    let dto = request.into_dto().map_err(domain_error)?;
    let rental = state
        .rental_service
        .update(id, dto)
        .await
        .map_err(domain_error)?;
    ok(rental.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/rentals/{id}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_rental(
    State(state): State<RentalHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state.rental_service.delete(id).await.map_err(domain_error)?;
    ok(())
}

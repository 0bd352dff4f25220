//! Vehicle API handlers
//!
//! Reads and quotes are public; writes are admin-only (enforced by the router).

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateVehicleRequest, ListVehiclesParams, QuoteRequest, QuoteResponse, UpdateVehicleRequest,
    VehicleDto,
};
use crate::application::VehicleService;
use crate::domain::RentalTier;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct VehicleHandlerState {
    pub vehicle_service: Arc<VehicleService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(ListVehiclesParams),
    responses(
        (status = 200, description = "Vehicle list", body = ApiResponse<PaginatedResponse<VehicleDto>>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleHandlerState>,
    Query(params): Query<ListVehiclesParams>,
) -> ApiResult<PaginatedResponse<VehicleDto>> {
    let filter = params.into_filter().map_err(domain_error)?;
    let vehicles = state
        .vehicle_service
        .list(filter)
        .await
        .map_err(domain_error)?;
    ok(PaginatedResponse::from_result(vehicles))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<VehicleDto> {
    let vehicle = state.vehicle_service.get(id).await.map_err(domain_error)?;
    ok(vehicle.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = ApiResponse<VehicleDto>),
        (status = 409, description = "License plate already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), ApiError> {
    let dto = request.into_dto().map_err(domain_error)?;
    let vehicle = state
        .vehicle_service
        .create(dto)
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleDto::from(vehicle))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> ApiResult<VehicleDto> {
    let dto = request.into_dto().map_err(domain_error)?;
    let vehicle = state
        .vehicle_service
        .update(id, dto)
        .await
        .map_err(domain_error)?;
    ok(vehicle.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Vehicle has rentals")
    )
)]
pub async fn delete_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state.vehicle_service.delete(id).await.map_err(domain_error)?;
    ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{id}/quote",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Rental period and price", body = ApiResponse<QuoteResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn quote_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<QuoteRequest>,
) -> ApiResult<QuoteResponse> {
    let tier = request
        .tier
        .as_deref()
        .map(RentalTier::parse_or_daily)
        .unwrap_or_default();

    let (vehicle, quote) = state
        .vehicle_service
        .quote(id, tier, request.start_time)
        .await
        .map_err(domain_error)?;
    ok(QuoteResponse::new(vehicle.id, quote))
}

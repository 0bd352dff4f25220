//! Payment API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreatePaymentRequest, ListPaymentsParams, PaymentDto, UpdatePaymentRequest};
use crate::application::PaymentService;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct PaymentHandlerState {
    pub payment_service: Arc<PaymentService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(ListPaymentsParams),
    responses(
        (status = 200, description = "Payments visible to the caller", body = ApiResponse<PaginatedResponse<PaymentDto>>)
    )
)]
pub async fn list_payments(
    State(state): State<PaymentHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(params): Query<ListPaymentsParams>,
) -> ApiResult<PaginatedResponse<PaymentDto>> {
    let filter = params.into_filter().map_err(domain_error)?;
    let payments = state
        .payment_service
        .list(auth_user.actor(), filter)
        .await
        .map_err(domain_error)?;
    ok(PaginatedResponse::from_result(payments))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentDto>),
        (status = 403, description = "Payment belongs to another user"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_payment(
    State(state): State<PaymentHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> ApiResult<PaymentDto> {
    let payment = state
        .payment_service
        .get(auth_user.actor(), id)
        .await
        .map_err(domain_error)?;
    ok(payment.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = ApiResponse<PaymentDto>),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn create_payment(
    State(state): State<PaymentHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentDto>>), ApiError> {
    let dto = request.into_dto().map_err(domain_error)?;
    let payment = state
        .payment_service
        .create(dto)
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PaymentDto::from(payment))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated", body = ApiResponse<PaymentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_payment(
    State(state): State<PaymentHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdatePaymentRequest>,
) -> ApiResult<PaymentDto> {
    let dto = request.into_dto().map_err(domain_error)?;
    let payment = state
        .payment_service
        .update(id, dto)
        .await
        .map_err(domain_error)?;
    ok(payment.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_payment(
    State(state): State<PaymentHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state.payment_service.delete(id).await.map_err(domain_error)?;
    ok(())
}

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension,
};

use super::dto::{BillingItemDto, BillingParams};
use crate::application::BillingService;
use crate::interfaces::http::common::{domain_error, ok, ApiResponse, ApiResult};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct BillingHandlerState {
    pub billing_service: Arc<BillingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/billings",
    tag = "Billings",
    security(("bearer_auth" = [])),
    params(BillingParams),
    responses(
        (status = 200, description = "Rentals with their payment, newest first", body = ApiResponse<Vec<BillingItemDto>>),
        (status = 403, description = "Another user's history")
    )
)]
pub async fn list_billings(
    State(state): State<BillingHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(params): Query<BillingParams>,
) -> ApiResult<Vec<BillingItemDto>> {
    let user_id = params.user_id.unwrap_or(auth_user.user_id);
    let items = state
        .billing_service
        .billing_for_user(auth_user.actor(), user_id)
        .await
        .map_err(domain_error)?;
    ok(items.into_iter().map(BillingItemDto::from).collect())
}

//! User management API handlers
//!
//! Admin-only CRUD endpoints. Delegates to `UserService`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateUserRequest, ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::{NewAccount, UserService};
use crate::domain::user::{GetUserDto, UpdateUserDto};
use crate::domain::UserRole;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::shared::PageRequest;

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<PaginatedResponse<UserDto>> {
    let dto = GetUserDto {
        search: params.search,
        role: params.role.as_deref().map(UserRole::from_str),
        page: PageRequest::new(params.page, params.limit),
        sort_by: params.sort_by,
    };

    let users = state.user_service.list_users(dto).await.map_err(domain_error)?;
    ok(PaginatedResponse::from_result(users))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<UserDto> {
    let user = state.user_service.get_user(id).await.map_err(domain_error)?;
    ok(user.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 409, description = "Username or email taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let account = NewAccount {
        username: request.username,
        email: request.email,
        full_name: request.full_name,
        phone_number: request.phone_number,
        password: request.password,
        role: request
            .role
            .as_deref()
            .map(UserRole::from_str)
            .unwrap_or_default(),
    };

    let user = state
        .user_service
        .create_user(account)
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let dto = UpdateUserDto {
        full_name: request.full_name,
        email: request.email,
        phone_number: request.phone_number,
        role: request.role.as_deref().map(UserRole::from_str),
        is_active: request.is_active,
    };

    let user = state
        .user_service
        .update_user(id, dto, request.password)
        .await
        .map_err(domain_error)?;
    ok(user.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state.user_service.delete_user(id).await.map_err(domain_error)?;
    ok(())
}

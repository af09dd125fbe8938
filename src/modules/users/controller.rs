use axum::{Extension, Json, extract::State};
use tracing::{info, instrument};
use vape_core::{AppError, ErrorResponse};
use vape_models::{MessageResponse, UpdateUserDto, User};

use crate::extract::JsonBody;
use crate::middleware::user::UserContext;
use crate::modules::users::service::UserService;
use crate::state::AppState;

pub const USER_DELETED_MESSAGE: &str = "user has been deleted";

/// Get a single user
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "The user id")
    ),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
        (status = 401, description = "Missing token, or token belongs to another non-admin user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_user(Extension(ctx): Extension<UserContext>) -> Json<User> {
    Json(ctx.user)
}

/// Update a single user
///
/// Absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "The user id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "Invalid user id or malformed request", body = ErrorResponse),
        (status = 401, description = "Missing token, or token belongs to another non-admin user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    JsonBody(dto): JsonBody<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_user(state.directory.as_ref(), ctx.id(), dto).await?;

    info!(user_id = user.id, caller_id = ctx.caller().id, "User updated");
    Ok(Json(user))
}

/// Delete a single user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "The user id")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
        (status = 401, description = "Missing token, or token belongs to another non-admin user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user(state.directory.as_ref(), ctx.id()).await?;

    info!(user_id = ctx.id(), caller_id = ctx.caller().id, "User deleted");
    Ok(Json(MessageResponse::new(USER_DELETED_MESSAGE)))
}

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use crate::{
    dto::{
        shops::ShopListResponse,
        users::{UpdateAvatarRequest, UpdateUserRequest, UserResponse},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    services::{shop_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_user))
        .route("/{id}", put(update_user))
        .route("/{id}/avatar", put(update_avatar))
        .route("/{id}/shops", get(user_shops))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let resp = user_service::get_user(&state.orm, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already taken"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let resp = user_service::update_user(&state.orm, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/avatar",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateAvatarRequest,
    responses(
        (status = 200, description = "Avatar updated", body = UserResponse),
        (status = 400, description = "Missing avatar data"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_avatar(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAvatarRequest>,
) -> AppResult<Json<UserResponse>> {
    let resp = user_service::update_avatar(&state.orm, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/shops",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's shops (zero or one)", body = ShopListResponse),
        (status = 403, description = "Only the user themselves may list their shops"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn user_shops(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ShopListResponse>> {
    let resp = shop_service::user_shops(&state.orm, &auth.user, id).await?;
    Ok(Json(resp))
}

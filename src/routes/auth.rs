use axum::{Json, extract::State, http::StatusCode};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    error::AppResult,
    services::auth_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Username or email already exists"),
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let resp = auth_service::register_user(&state.orm, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let resp = auth_service::login_user(&state.orm, payload).await?;
    Ok(Json(resp))
}

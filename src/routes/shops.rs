use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::shops::{CreateShopRequest, ShopListResponse, ShopResponse, UpdateShopRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    services::shop_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shops))
        .route("/", post(create_shop))
        .route("/{id}", get(get_shop))
        .route("/{id}", put(update_shop))
}

#[utoipa::path(
    get,
    path = "/api/shops",
    responses(
        (status = 200, description = "All shops with owner summary and product count", body = ShopListResponse),
    ),
    tag = "Shops"
)]
pub async fn list_shops(State(state): State<AppState>) -> AppResult<Json<ShopListResponse>> {
    let resp = shop_service::list_shops(&state.orm).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}",
    params(("id" = i64, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop with owner summary", body = ShopResponse),
        (status = 404, description = "Shop not found"),
    ),
    tag = "Shops"
)]
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ShopResponse>> {
    let resp = shop_service::get_shop(&state.orm, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/shops",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Shop created, user upgraded to seller", body = ShopResponse),
        (status = 400, description = "Missing shop name"),
        (status = 409, description = "User already has a shop"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shops"
)]
pub async fn create_shop(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateShopRequest>,
) -> AppResult<(StatusCode, Json<ShopResponse>)> {
    let resp = shop_service::create_shop(&state.orm, &auth.user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/shops/{id}",
    params(("id" = i64, Path, description = "Shop ID")),
    request_body = UpdateShopRequest,
    responses(
        (status = 200, description = "Shop updated", body = ShopResponse),
        (status = 403, description = "Shop owned by another user"),
        (status = 404, description = "Shop not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shops"
)]
pub async fn update_shop(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateShopRequest>,
) -> AppResult<Json<ShopResponse>> {
    let resp = shop_service::update_shop(&state.orm, auth.user.id, id, payload).await?;
    Ok(Json(resp))
}

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::{
    dto::products::{
        CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::MessageResponse,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
        .route("/{id}", get(get_product))
        .route("/{id}", put(update_product))
        .route("/{id}", delete(delete_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("shopId" = Option<String>, Query, description = "Filter by shop id"),
        ("status" = Option<String>, Query, description = "available | unavailable | archived"),
        ("category" = Option<String>, Query, description = "Exact category match"),
        ("search" = Option<String>, Query, description = "Substring match on name or description"),
        ("page" = Option<String>, Query, description = "1-indexed page, default 1"),
        ("limit" = Option<String>, Query, description = "Items per page, default 18"),
        ("sort" = Option<String>, Query, description = "priceLow | priceHigh | name | newest"),
    ),
    responses(
        (status = 200, description = "Catalog page", body = ProductListResponse),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ProductListResponse>> {
    let resp = product_service::list_products(&state.orm, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductResponse>> {
    let resp = product_service::get_product(&state.orm, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid input or no shop"),
        (status = 403, description = "Not a seller, or shop not owned"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let resp = product_service::create_product(&state.orm, &auth.user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 403, description = "Product belongs to another user's shop"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let resp = product_service::update_product(&state.orm, auth.user.id, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product soft-deleted", body = MessageResponse),
        (status = 403, description = "Product belongs to another user's shop"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let resp = product_service::delete_product(&state.orm, auth.user.id, id).await?;
    Ok(Json(resp))
}

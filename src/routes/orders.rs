//! Order endpoints are placeholders: the order domain is not implemented and
//! the handlers answer with a message only, matching the public contract.

use axum::{
    Json, Router,
    extract::Path,
    routing::{get, post, put},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/", post(create_order))
        .route("/{id}", get(get_order))
        .route("/{id}", put(update_order))
}

#[utoipa::path(get, path = "/api/orders", tag = "Orders")]
pub async fn list_orders() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Get all orders endpoint" }))
}

#[utoipa::path(get, path = "/api/orders/{id}", tag = "Orders")]
pub async fn get_order(Path(id): Path<i64>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Get order endpoint", "id": id }))
}

#[utoipa::path(post, path = "/api/orders", tag = "Orders")]
pub async fn create_order() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Create order endpoint" }))
}

#[utoipa::path(put, path = "/api/orders/{id}", tag = "Orders")]
pub async fn update_order(Path(id): Path<i64>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Update order endpoint", "id": id }))
}

//! Invoice endpoints are placeholders, like orders.

use axum::{Json, Router, extract::Path, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices))
        .route("/{id}", get(get_invoice))
}

#[utoipa::path(get, path = "/api/invoices", tag = "Invoices")]
pub async fn list_invoices() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Get all invoices endpoint" }))
}

#[utoipa::path(get, path = "/api/invoices/{id}", tag = "Invoices")]
pub async fn get_invoice(Path(id): Path<i64>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Get invoice endpoint", "id": id }))
}

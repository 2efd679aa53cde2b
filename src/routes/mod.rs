use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod health;
pub mod invoices;
pub mod orders;
pub mod params;
pub mod products;
pub mod shops;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/health", get(health::health_check))
        .nest("/products", products::router())
        .nest("/shops", shops::router())
        .nest("/users", users::router())
        .nest("/orders", orders::router())
        .nest("/invoices", invoices::router())
}

pub mod auth_service;
pub mod ownership;
pub mod product_service;
pub mod shop_service;
pub mod user_service;

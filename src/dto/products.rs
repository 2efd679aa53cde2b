use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::enums::ProductStatus,
    error::{AppError, AppResult},
    models::Product,
    response::PageInfo,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    /// Defaults to the seller's own shop when absent.
    pub shop_id: Option<i64>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::Validation("Product name is required".into()));
        }
        validate_price_and_stock(self.price, self.stock)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::Validation("Product name cannot be empty".into()));
        }
        validate_price_and_stock(self.price, self.stock)
    }
}

fn validate_price_and_stock(price: Option<f64>, stock: Option<i32>) -> AppResult<()> {
    if price.is_some_and(|p| p < 0.0) {
        return Err(AppError::Validation("Price cannot be negative".into()));
    }
    if stock.is_some_and(|s| s < 0) {
        return Err(AppError::Validation("Stock cannot be negative".into()));
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub pagination: PageInfo,
}

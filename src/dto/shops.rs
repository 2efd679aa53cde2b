use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Shop;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShopRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
}

/// Partial update. Empty strings count as "not provided": fields are never
/// clearable through this path.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateShopRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub shop: Shop,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopListResponse {
    pub shops: Vec<Shop>,
}

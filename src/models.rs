use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{
    enums::{ProductStatus, Role},
    products, shops, users,
};

/// Public view of a user. The password hash never leaves the entity layer.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            address: model.address,
            avatar: model.avatar,
            shop_id: model.shop_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Owner details embedded in shop responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
}

impl From<users::Model> for OwnerSummary {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            avatar: model.avatar,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present on listing endpoints only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<i64>,
    /// Omitted when the owner row cannot be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerSummary>,
}

impl From<shops::Model> for Shop {
    fn from(model: shops::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            logo: model.logo,
            address: model.address,
            user_id: model.user_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            product_count: None,
            owner: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: ProductStatus,
    pub shop_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            stock: model.stock,
            image: model.image,
            category: model.category,
            status: model.status,
            shop_id: model.shop_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            deleted_at: model.deleted_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

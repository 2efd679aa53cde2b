//! Ownership resolution for the User -> Shop -> Product chain.
//!
//! Every write path walks the live graph here, per request. Nothing is
//! cached, so a reassigned shop takes effect on the very next call.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    db::OrmConn,
    entity::{Products, Shops, products, shops},
    error::{AppError, AppResult},
};

/// Fetch the shop and require `user_id` to own it.
pub async fn ensure_shop_owner(db: &OrmConn, user_id: i64, shop_id: i64) -> AppResult<shops::Model> {
    let shop = Shops::find_by_id(shop_id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Shop"))?;

    if shop.user_id != user_id {
        tracing::debug!(user_id, shop_id, owner = shop.user_id, "shop ownership denied");
        return Err(AppError::Forbidden(
            "Not authorized to manage this shop".into(),
        ));
    }

    Ok(shop)
}

/// Fetch the product (soft-deleted rows excluded) and require `user_id` to
/// own the shop it belongs to.
///
/// A product whose shop row is missing is a data-integrity fault and surfaces
/// as an internal error, never as a client error.
pub async fn ensure_product_owner(
    db: &OrmConn,
    user_id: i64,
    product_id: i64,
) -> AppResult<(products::Model, shops::Model)> {
    let product = Products::find_by_id(product_id)
        .filter(products::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    let shop = Shops::find_by_id(product.shop_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "product {} references missing shop {}",
                product.id,
                product.shop_id
            ))
        })?;

    if shop.user_id != user_id {
        tracing::debug!(
            user_id,
            product_id,
            shop_id = shop.id,
            owner = shop.user_id,
            "product ownership denied"
        );
        return Err(AppError::Forbidden(
            "Not authorized to manage this product".into(),
        ));
    }

    Ok((product, shop))
}

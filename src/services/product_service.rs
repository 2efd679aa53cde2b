use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    db::OrmConn,
    dto::products::{
        CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
    },
    entity::{
        Products,
        enums::{ProductStatus, Role},
        products::{self, Column},
        users,
    },
    error::{AppError, AppResult},
    response::{MessageResponse, PageInfo},
    routes::params::{ProductQuery, SortKey},
    services::ownership,
};

/// Catalog listing: conjunctive filters, closed sort vocabulary, count before
/// pagination over the identical condition. Count and fetch are two
/// statements; under concurrent writes the page may drift slightly from the
/// total, which is accepted.
pub async fn list_products(db: &OrmConn, query: ProductQuery) -> AppResult<ProductListResponse> {
    let (page, limit, offset) = query.pagination();
    let condition = build_condition(&query)?;

    let mut finder = Products::find().filter(condition);
    finder = match query.sort_key() {
        SortKey::Featured => finder.order_by_asc(Column::Id),
        SortKey::PriceLow => finder.order_by_asc(Column::Price),
        SortKey::PriceHigh => finder.order_by_desc(Column::Price),
        SortKey::Name => finder.order_by_asc(Column::Name),
        SortKey::Newest => finder.order_by_desc(Column::CreatedAt),
    };

    let total = finder.clone().count(db).await? as i64;

    let products = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ProductListResponse {
        products,
        pagination: PageInfo::new(total, page, limit),
    })
}

fn build_condition(query: &ProductQuery) -> AppResult<Condition> {
    // Soft-deleted rows never appear in listings.
    let mut condition = Condition::all().add(Column::DeletedAt.is_null());

    if let Some(shop_id) = query.shop_id.as_ref().filter(|s| !s.is_empty()) {
        let shop_id: i64 = shop_id
            .parse()
            .map_err(|_| AppError::Validation("Invalid shopId filter".into()))?;
        condition = condition.add(Column::ShopId.eq(shop_id));
    }

    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status = ProductStatus::from_param(status)
            .ok_or_else(|| AppError::Validation("Invalid status filter".into()))?;
        condition = condition.add(Column::Status.eq(status));
    }

    if let Some(category) = query.category.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Category.eq(category.as_str()));
    }

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    Ok(condition)
}

/// Direct id lookup. Soft-deleted products stay addressable here for
/// referential integrity with historical order data.
pub async fn get_product(db: &OrmConn, id: i64) -> AppResult<ProductResponse> {
    let product = Products::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    Ok(ProductResponse {
        product: product.into(),
    })
}

pub async fn create_product(
    db: &OrmConn,
    user: &users::Model,
    payload: CreateProductRequest,
) -> AppResult<ProductResponse> {
    if user.role != Role::Seller {
        return Err(AppError::Forbidden(
            "Only sellers can create products".into(),
        ));
    }

    payload.validate()?;

    let shop_id = match payload.shop_id {
        // An explicit shop id must belong to the acting user; cross-shop
        // creation is rejected.
        Some(shop_id) => ownership::ensure_shop_owner(db, user.id, shop_id).await?.id,
        None => user
            .shop_id
            .ok_or_else(|| AppError::Validation("You need to create a shop first".into()))?,
    };

    let product = products::ActiveModel {
        id: NotSet,
        name: Set(payload.name.unwrap_or_default()),
        description: Set(payload.description),
        price: Set(payload.price.unwrap_or(0.0)),
        stock: Set(payload.stock.unwrap_or(0)),
        image: Set(payload.image),
        category: Set(payload.category),
        status: Set(payload.status.unwrap_or(ProductStatus::Available)),
        shop_id: Set(shop_id),
        created_at: NotSet,
        updated_at: NotSet,
        deleted_at: Set(None),
    }
    .insert(db)
    .await?;

    tracing::info!(product_id = product.id, shop_id, "product created");

    Ok(ProductResponse {
        product: product.into(),
    })
}

pub async fn update_product(
    db: &OrmConn,
    user_id: i64,
    product_id: i64,
    payload: UpdateProductRequest,
) -> AppResult<ProductResponse> {
    let (product, _shop) = ownership::ensure_product_owner(db, user_id, product_id).await?;

    payload.validate()?;

    // shop_id is deliberately untouched: products cannot move between shops.
    let mut active: products::ActiveModel = product.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(stock) = payload.stock {
        active.stock = Set(stock);
    }
    if let Some(image) = payload.image {
        active.image = Set(Some(image));
    }
    if let Some(category) = payload.category {
        active.category = Set(Some(category));
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());

    let product = active.update(db).await?;

    Ok(ProductResponse {
        product: product.into(),
    })
}

/// Soft delete: the row keeps its id and drops out of default listings.
pub async fn delete_product(
    db: &OrmConn,
    user_id: i64,
    product_id: i64,
) -> AppResult<MessageResponse> {
    let (product, _shop) = ownership::ensure_product_owner(db, user_id, product_id).await?;

    let mut active: products::ActiveModel = product.into();
    active.deleted_at = Set(Some(Utc::now().into()));
    active.update(db).await?;

    tracing::info!(product_id, "product soft-deleted");

    Ok(MessageResponse::new("Product deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_filter_is_a_validation_error() {
        let query = ProductQuery {
            status: Some("bogus".to_string()),
            ..ProductQuery::default()
        };
        assert!(matches!(
            build_condition(&query),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn known_status_and_empty_filters_build_a_condition() {
        let query = ProductQuery {
            status: Some("available".to_string()),
            ..ProductQuery::default()
        };
        assert!(build_condition(&query).is_ok());

        // Empty strings are treated as absent filters, including status.
        let query = ProductQuery {
            status: Some(String::new()),
            ..ProductQuery::default()
        };
        assert!(build_condition(&query).is_ok());
    }

    #[test]
    fn non_numeric_shop_id_filter_is_a_validation_error() {
        let query = ProductQuery {
            shop_id: Some("seven".to_string()),
            ..ProductQuery::default()
        };
        assert!(matches!(
            build_condition(&query),
            Err(AppError::Validation(_))
        ));
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::{
    db::OrmConn,
    dto::shops::{CreateShopRequest, ShopListResponse, ShopResponse, UpdateShopRequest},
    entity::{
        Products, Shops, Users,
        enums::Role,
        products, shops, users,
    },
    error::{AppError, AppResult},
    models::{OwnerSummary, Shop},
    services::ownership,
};

pub async fn list_shops(db: &OrmConn) -> AppResult<ShopListResponse> {
    let shops = Shops::find().all(db).await?;

    let mut out = Vec::with_capacity(shops.len());
    for shop in shops {
        let mut view = decorate_with_owner(db, shop).await?;
        view.product_count = Some(product_count(db, view.id).await);
        out.push(view);
    }

    Ok(ShopListResponse { shops: out })
}

pub async fn get_shop(db: &OrmConn, id: i64) -> AppResult<ShopResponse> {
    let shop = Shops::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Shop"))?;

    Ok(ShopResponse {
        message: None,
        shop: decorate_with_owner(db, shop).await?,
    })
}

/// Shops of one user, visible only to that user.
pub async fn user_shops(
    db: &OrmConn,
    current_user: &users::Model,
    user_id: i64,
) -> AppResult<ShopListResponse> {
    if current_user.id != user_id {
        return Err(AppError::Forbidden(
            "Not authorized to view other users' shops".into(),
        ));
    }

    let shops = Shops::find()
        .filter(shops::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    let mut out = Vec::with_capacity(shops.len());
    for shop in shops {
        out.push(decorate_with_owner(db, shop).await?);
    }

    Ok(ShopListResponse { shops: out })
}

pub async fn create_shop(
    db: &OrmConn,
    user: &users::Model,
    payload: CreateShopRequest,
) -> AppResult<ShopResponse> {
    let name = payload
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Shop name is required".into()))?;

    let existing = Shops::find()
        .filter(shops::Column::UserId.eq(user.id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("User already has a shop".into()));
    }

    let shop = shops::ActiveModel {
        id: NotSet,
        name: Set(name),
        description: Set(payload.description),
        logo: Set(payload.logo),
        address: Set(payload.address),
        user_id: Set(user.id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(db)
    .await
    .map_err(|err| match err.sql_err() {
        // The lookup above and this insert are two statements. The unique
        // index on shops.user_id closes the race: the second concurrent
        // create lands here.
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("User already has a shop".into())
        }
        _ => AppError::OrmError(err),
    })?;

    // First shop creation turns the buyer into a seller.
    let mut acting: users::ActiveModel = Users::find_by_id(user.id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("User"))?
        .into();
    acting.role = Set(Role::Seller);
    acting.shop_id = Set(Some(shop.id));
    acting.updated_at = Set(Utc::now().into());
    acting.update(db).await?;

    tracing::info!(user_id = user.id, shop_id = shop.id, "shop created");

    Ok(ShopResponse {
        message: Some("Shop created successfully".into()),
        shop: shop.into(),
    })
}

pub async fn update_shop(
    db: &OrmConn,
    user_id: i64,
    shop_id: i64,
    payload: UpdateShopRequest,
) -> AppResult<ShopResponse> {
    let shop = ownership::ensure_shop_owner(db, user_id, shop_id).await?;

    let mut active: shops::ActiveModel = shop.into();
    if let Some(name) = payload.name.filter(|s| !s.is_empty()) {
        active.name = Set(name);
    }
    if let Some(description) = payload.description.filter(|s| !s.is_empty()) {
        active.description = Set(Some(description));
    }
    if let Some(logo) = payload.logo.filter(|s| !s.is_empty()) {
        active.logo = Set(Some(logo));
    }
    if let Some(address) = payload.address.filter(|s| !s.is_empty()) {
        active.address = Set(Some(address));
    }
    active.updated_at = Set(Utc::now().into());

    let shop = active.update(db).await?;

    Ok(ShopResponse {
        message: Some("Shop updated successfully".into()),
        shop: shop.into(),
    })
}

async fn decorate_with_owner(db: &OrmConn, shop: shops::Model) -> AppResult<Shop> {
    let owner = Users::find_by_id(shop.user_id).one(db).await?;
    let mut view = Shop::from(shop);
    view.owner = owner.map(OwnerSummary::from);
    Ok(view)
}

// A count failure degrades to zero rather than failing the whole listing.
async fn product_count(db: &OrmConn, shop_id: i64) -> i64 {
    match Products::find()
        .filter(products::Column::ShopId.eq(shop_id))
        .filter(products::Column::DeletedAt.is_null())
        .count(db)
        .await
    {
        Ok(count) => count as i64,
        Err(err) => {
            tracing::warn!(shop_id, error = %err, "product count failed");
            0
        }
    }
}

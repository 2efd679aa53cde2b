use axum_marketplace_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{
        Products, Shops, Users,
        enums::{ProductStatus, Role},
        products, shops, users,
    },
    services::auth_service::hash_password,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let buyer_id = ensure_user(&orm, "buyer", "buyer@example.com", Role::Buyer).await?;
    let seller_id = ensure_user(&orm, "seller", "seller@example.com", Role::Seller).await?;
    let shop_id = ensure_shop(&orm, seller_id, "Ferris Goods").await?;
    seed_products(&orm, shop_id).await?;

    println!("Seed completed. Buyer ID: {buyer_id}, Seller ID: {seller_id}, Shop ID: {shop_id}");
    Ok(())
}

async fn ensure_user(db: &OrmConn, username: &str, email: &str, role: Role) -> anyhow::Result<i64> {
    if let Some(existing) = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?
    {
        return Ok(existing.id);
    }

    let user = users::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password("password123").map_err(|e| anyhow::anyhow!("{e}"))?),
        role: Set(role),
        first_name: Set(username.to_string()),
        last_name: Set("Example".to_string()),
        phone: Set(None),
        address: Set(None),
        avatar: Set(None),
        shop_id: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(db)
    .await?;

    println!("Ensured user {email} (role={role:?})");
    Ok(user.id)
}

async fn ensure_shop(db: &OrmConn, user_id: i64, name: &str) -> anyhow::Result<i64> {
    if let Some(existing) = Shops::find()
        .filter(shops::Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        return Ok(existing.id);
    }

    let shop = shops::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(Some("Everything a Rustacean needs".to_string())),
        logo: Set(None),
        address: Set(None),
        user_id: Set(user_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(db)
    .await?;

    let mut owner: users::ActiveModel = Users::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("seed user missing"))?
        .into();
    owner.role = Set(Role::Seller);
    owner.shop_id = Set(Some(shop.id));
    owner.update(db).await?;

    println!("Ensured shop {name}");
    Ok(shop.id)
}

async fn seed_products(db: &OrmConn, shop_id: i64) -> anyhow::Result<()> {
    let items = [
        ("Axum Hoodie", "Warm hoodie for Rustaceans", 55.0, 50, "Apparel"),
        ("Ferris Mug", "Coffee tastes better with Ferris", 12.0, 100, "Kitchen"),
        ("Rust Sticker Pack", "Decorate your laptop", 5.0, 200, "Accessories"),
        ("Mechanical Keyboard", "Clacky and reliable", 89.0, 25, "Electronics"),
    ];

    for (name, desc, price, stock, category) in items {
        let exists = Products::find()
            .filter(products::Column::Name.eq(name))
            .filter(products::Column::ShopId.eq(shop_id))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        products::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            description: Set(Some(desc.to_string())),
            price: Set(price),
            stock: Set(stock),
            image: Set(None),
            category: Set(Some(category.to_string())),
            status: Set(ProductStatus::Available),
            shop_id: Set(shop_id),
            created_at: NotSet,
            updated_at: NotSet,
            deleted_at: Set(None),
        }
        .insert(db)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

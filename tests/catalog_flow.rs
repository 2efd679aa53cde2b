use axum_marketplace_api::{
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{
        enums::{ProductStatus, Role},
        products, shops, users,
    },
    routes::params::ProductQuery,
    services::product_service,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};

// Catalog engine: conjunctive filters, sort, pagination math, soft-delete
// scoping. Runs against a real database when one is configured.
#[tokio::test]
async fn catalog_filters_sort_and_pagination() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests."
            );
            return Ok(());
        }
    };

    let db = setup(&database_url).await?;

    let seller = create_user(&db, "catalog_seller", "catalog_seller@example.com", Role::Seller).await?;
    let shop = create_shop(&db, seller.id, "Catalog Shop").await?;

    // Five Electronics products priced 10..=50.
    for (i, price) in [10.0, 20.0, 30.0, 40.0, 50.0].iter().enumerate() {
        create_product(&db, shop.id, &format!("Gadget {i}"), *price, "Electronics").await?;
    }
    // Noise in another category; must never appear in the filtered set.
    let snack = create_product(&db, shop.id, "Trail Mix", 4.0, "Food").await?;

    // priceLow, page 2, limit 2 over the five Electronics items.
    let page = product_service::list_products(
        &db,
        ProductQuery {
            category: Some("Electronics".into()),
            sort: Some("priceLow".into()),
            page: Some("2".into()),
            limit: Some("2".into()),
            ..ProductQuery::default()
        },
    )
    .await?;

    let prices: Vec<f64> = page.products.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![30.0, 40.0]);
    assert_eq!(page.pagination.total_products, 5);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.current_page, 2);
    assert_eq!(page.pagination.limit, 2);

    // Identical parameters over an unchanged catalog give identical results.
    let again = product_service::list_products(
        &db,
        ProductQuery {
            category: Some("Electronics".into()),
            sort: Some("priceLow".into()),
            page: Some("2".into()),
            limit: Some("2".into()),
            ..ProductQuery::default()
        },
    )
    .await?;
    let again_prices: Vec<f64> = again.products.iter().map(|p| p.price).collect();
    assert_eq!(prices, again_prices);
    assert_eq!(page.pagination.total_products, again.pagination.total_products);

    // search is a disjunction over name/description, ANDed with category.
    let searched = product_service::list_products(
        &db,
        ProductQuery {
            category: Some("Electronics".into()),
            search: Some("gadget 3".into()),
            ..ProductQuery::default()
        },
    )
    .await?;
    assert_eq!(searched.products.len(), 1);
    assert_eq!(searched.products[0].name, "Gadget 3");

    // Bad page/limit are ignored, not rejected.
    let lenient = product_service::list_products(
        &db,
        ProductQuery {
            page: Some("zero".into()),
            limit: Some("-3".into()),
            sort: Some("mystery".into()),
            ..ProductQuery::default()
        },
    )
    .await?;
    assert_eq!(lenient.pagination.current_page, 1);
    assert_eq!(lenient.pagination.limit, 18);
    assert_eq!(lenient.pagination.total_products, 6);

    // Soft-deleted rows drop out of listings but stay addressable by id.
    product_service::delete_product(&db, seller.id, snack.id).await?;
    let after_delete = product_service::list_products(&db, ProductQuery::default()).await?;
    assert_eq!(after_delete.pagination.total_products, 5);
    assert!(after_delete.products.iter().all(|p| p.id != snack.id));

    let direct = product_service::get_product(&db, snack.id).await?;
    assert!(direct.product.deleted_at.is_some());

    Ok(())
}

async fn setup(database_url: &str) -> anyhow::Result<OrmConn> {
    let db = create_orm_conn(database_url).await?;
    run_migrations(&db).await?;

    let backend = db.get_database_backend();
    db.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE products, shops, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(db)
}

async fn create_user(
    db: &OrmConn,
    username: &str,
    email: &str,
    role: Role,
) -> anyhow::Result<users::Model> {
    let user = users::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        role: Set(role),
        first_name: Set("Test".into()),
        last_name: Set("User".into()),
        phone: Set(None),
        address: Set(None),
        avatar: Set(None),
        shop_id: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(db)
    .await?;
    Ok(user)
}

async fn create_shop(db: &OrmConn, user_id: i64, name: &str) -> anyhow::Result<shops::Model> {
    let shop = shops::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(None),
        logo: Set(None),
        address: Set(None),
        user_id: Set(user_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(db)
    .await?;
    Ok(shop)
}

async fn create_product(
    db: &OrmConn,
    shop_id: i64,
    name: &str,
    price: f64,
    category: &str,
) -> anyhow::Result<products::Model> {
    let product = products::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(Some(format!("{name} description"))),
        price: Set(price),
        stock: Set(10),
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
    Ok(product)
}

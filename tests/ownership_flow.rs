use axum_marketplace_api::{
    db::{OrmConn, create_orm_conn, run_migrations},
    dto::{
        auth::{LoginRequest, RegisterRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        shops::{CreateShopRequest, UpdateShopRequest},
    },
    entity::{Users, enums::Role},
    error::AppError,
    services::{auth_service, product_service, shop_service},
    token,
};
use sea_orm::{ConnectionTrait, EntityTrait, Statement};

// Full ownership chain: register -> login -> create shop (role upgrade) ->
// create/update/delete products, with a second user probing every boundary.
#[tokio::test]
async fn ownership_chain_governs_all_mutations() -> anyhow::Result<()> {
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

    let alice = register(&db, "alice", "alice@example.com").await?;
    let bob = register(&db, "bob", "bob@example.com").await?;

    // Login issues a parseable identity token.
    let login = auth_service::login_user(
        &db,
        LoginRequest {
            email: "alice@example.com".into(),
            password: "password123".into(),
        },
    )
    .await?;
    let claims = token::parse(&login.token)?;
    assert_eq!(claims.user_id, alice.id);
    assert_eq!(claims.username, "alice");

    let wrong_password = auth_service::login_user(
        &db,
        LoginRequest {
            email: "alice@example.com".into(),
            password: "wrong-password".into(),
        },
    )
    .await;
    assert!(matches!(wrong_password, Err(AppError::Unauthenticated(_))));

    // Scenario A: no shop yet, product creation without a shop id fails. A
    // fresh registration is a buyer, so the role gate fires first; once Alice
    // is a seller the missing-shop path is exercised below through Bob.
    let alice_row = Users::find_by_id(alice.id).one(&db).await?.unwrap();
    let before_shop =
        product_service::create_product(&db, &alice_row, product_input("Lamp", None)).await;
    assert!(matches!(before_shop, Err(AppError::Forbidden(_))));

    // Shop creation upgrades the buyer to seller and stamps shop_id.
    let created = shop_service::create_shop(
        &db,
        &alice_row,
        CreateShopRequest {
            name: Some("Alice's Attic".into()),
            description: Some("Curiosities".into()),
            logo: None,
            address: None,
        },
    )
    .await?;
    let shop = created.shop;

    let alice_row = Users::find_by_id(alice.id).one(&db).await?.unwrap();
    assert_eq!(alice_row.role, Role::Seller);
    assert_eq!(alice_row.shop_id, Some(shop.id));

    // At most one shop per user.
    let second = shop_service::create_shop(
        &db,
        &alice_row,
        CreateShopRequest {
            name: Some("Alice's Basement".into()),
            description: None,
            logo: None,
            address: None,
        },
    )
    .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    // A seller without a shop row hits the missing-shop validation.
    let mut bob_row = Users::find_by_id(bob.id).one(&db).await?.unwrap();
    bob_row.role = Role::Seller;
    let no_shop = product_service::create_product(&db, &bob_row, product_input("Lamp", None)).await;
    assert!(matches!(no_shop, Err(AppError::Validation(_))));

    // Scenario B: explicit owned shop id; status defaults to available.
    let created =
        product_service::create_product(&db, &alice_row, product_input("Lamp", Some(shop.id)))
            .await?;
    let product = created.product;
    assert_eq!(product.shop_id, shop.id);
    assert_eq!(
        serde_json::to_value(product.status)?,
        serde_json::json!("available")
    );

    // Cross-shop creation is forbidden even for sellers.
    let cross =
        product_service::create_product(&db, &bob_row, product_input("Intruder", Some(shop.id)))
            .await;
    assert!(matches!(cross, Err(AppError::Forbidden(_))));

    // Non-owners cannot update or delete; the owner can.
    let update = UpdateProductRequest {
        name: None,
        description: None,
        price: Some(19.5),
        stock: None,
        image: None,
        category: None,
        status: None,
    };
    let foreign_update =
        product_service::update_product(&db, bob.id, product.id, update).await;
    assert!(matches!(foreign_update, Err(AppError::Forbidden(_))));

    let foreign_delete = product_service::delete_product(&db, bob.id, product.id).await;
    assert!(matches!(foreign_delete, Err(AppError::Forbidden(_))));

    let owned_update = product_service::update_product(
        &db,
        alice.id,
        product.id,
        UpdateProductRequest {
            name: Some("Brass Lamp".into()),
            description: None,
            price: Some(19.5),
            stock: None,
            image: None,
            category: None,
            status: None,
        },
    )
    .await?;
    assert_eq!(owned_update.product.name, "Brass Lamp");
    assert_eq!(owned_update.product.price, 19.5);
    assert_eq!(owned_update.product.shop_id, shop.id);

    // Shop updates apply only non-empty fields.
    let updated_shop = shop_service::update_shop(
        &db,
        alice.id,
        shop.id,
        UpdateShopRequest {
            name: Some("".into()),
            description: Some("Rare curiosities".into()),
            logo: None,
            address: None,
        },
    )
    .await?;
    assert_eq!(updated_shop.shop.name, "Alice's Attic");
    assert_eq!(
        updated_shop.shop.description.as_deref(),
        Some("Rare curiosities")
    );

    let foreign_shop_update = shop_service::update_shop(
        &db,
        bob.id,
        shop.id,
        UpdateShopRequest {
            name: Some("Bob's Now".into()),
            description: None,
            logo: None,
            address: None,
        },
    )
    .await;
    assert!(matches!(foreign_shop_update, Err(AppError::Forbidden(_))));

    // Shop listings are self-only.
    let foreign_listing = shop_service::user_shops(&db, &bob_row, alice.id).await;
    assert!(matches!(foreign_listing, Err(AppError::Forbidden(_))));

    let own_listing = shop_service::user_shops(&db, &alice_row, alice.id).await?;
    assert_eq!(own_listing.shops.len(), 1);
    assert_eq!(own_listing.shops[0].id, shop.id);

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

async fn register(
    db: &OrmConn,
    username: &str,
    email: &str,
) -> anyhow::Result<axum_marketplace_api::models::User> {
    let resp = auth_service::register_user(
        db,
        RegisterRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some("password123".into()),
            first_name: Some("Test".into()),
            last_name: Some("User".into()),
            role: None,
            phone: None,
            address: None,
            avatar: None,
        },
    )
    .await?;
    Ok(resp.user)
}

fn product_input(name: &str, shop_id: Option<i64>) -> CreateProductRequest {
    CreateProductRequest {
        name: Some(name.to_string()),
        description: Some("A test product".into()),
        price: Some(10.0),
        stock: Some(5),
        image: None,
        category: None,
        status: None,
        shop_id,
    }
}

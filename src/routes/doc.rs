use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        products::{
            CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
        },
        shops::{CreateShopRequest, ShopListResponse, ShopResponse, UpdateShopRequest},
        users::{UpdateAvatarRequest, UpdateUserRequest, UserResponse},
    },
    error::ErrorBody,
    models::{OwnerSummary, Product, Shop, User},
    response::{MessageResponse, PageInfo},
    routes::{auth, health, invoices, orders, products, shops, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        shops::list_shops,
        shops::get_shop,
        shops::create_shop,
        shops::update_shop,
        users::get_user,
        users::update_user,
        users::update_avatar,
        users::user_shops,
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        invoices::list_invoices,
        invoices::get_invoice,
    ),
    components(
        schemas(
            User,
            Shop,
            Product,
            OwnerSummary,
            PageInfo,
            MessageResponse,
            ErrorBody,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            CreateShopRequest,
            UpdateShopRequest,
            ShopResponse,
            ShopListResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            ProductListResponse,
            UpdateUserRequest,
            UpdateAvatarRequest,
            UserResponse,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and login"),
        (name = "Products", description = "Catalog queries and product management"),
        (name = "Shops", description = "Shop reads and seller shop management"),
        (name = "Users", description = "User profile endpoints"),
        (name = "Orders", description = "Order endpoints (stubs)"),
        (name = "Invoices", description = "Invoice endpoints (stubs)"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

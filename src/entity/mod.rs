pub mod enums;
pub mod products;
pub mod shops;
pub mod users;

pub use products::Entity as Products;
pub use shops::Entity as Shops;
pub use users::Entity as Users;

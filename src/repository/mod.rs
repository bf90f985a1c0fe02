use crate::db::{DbConnection, DbPool};
use crate::domain::banner::{Banner, NewBanner, UpdateBanner};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::order::{
    DeliveryStatus, NewOrder, Order, OrderListQuery, PaymentStatus,
};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::settings::{DefaultSettings, StoreSettings, UpdateStoreSettings};
use crate::domain::user::{NewUser, User};

pub mod banner;
pub mod category;
pub mod errors;
pub mod order;
pub mod product;
pub mod settings;
pub mod user;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// Diesel-backed repository implementation that wraps an r2d2 pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over catalog products.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Distinct brands of active products, for the shop filter sidebar.
    fn list_brands(&self) -> RepositoryResult<Vec<String>>;
    /// Distinct fragrance types of active products.
    fn list_fragrance_types(&self) -> RepositoryResult<Vec<String>>;
}

/// Write operations over catalog products.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over orders.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over orders.
pub trait OrderWriter {
    /// Create the order, its items, and decrement stock for every line as a
    /// single atomic unit of work. A line whose conditional decrement
    /// affects no rows aborts the whole transaction with
    /// [`RepositoryError::InsufficientStock`].
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn set_payment_status(
        &self,
        order_id: i32,
        status: PaymentStatus,
        reference: Option<&str>,
    ) -> RepositoryResult<Order>;
    fn set_delivery_status(&self, order_id: i32, status: DeliveryStatus)
    -> RepositoryResult<Order>;
    fn delete_order(&self, order_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over categories.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over categories.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over banners.
pub trait BannerReader {
    fn get_banner_by_id(&self, id: i32) -> RepositoryResult<Option<Banner>>;
    fn list_banners(&self, only_active: bool) -> RepositoryResult<Vec<Banner>>;
}

/// Write operations over banners.
pub trait BannerWriter {
    fn create_banner(&self, new_banner: &NewBanner) -> RepositoryResult<Banner>;
    fn update_banner(&self, banner_id: i32, updates: &UpdateBanner) -> RepositoryResult<Banner>;
    fn delete_banner(&self, banner_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn count_users_by_role(&self, role: &str) -> RepositoryResult<usize>;
}

/// Write operations over accounts.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only access to the store settings row.
pub trait SettingsReader {
    fn get_settings(&self) -> RepositoryResult<Option<StoreSettings>>;
}

/// Write access to the store settings row.
pub trait SettingsWriter {
    /// Return the settings row, creating it from `defaults` when missing.
    fn ensure_settings(&self, defaults: &DefaultSettings) -> RepositoryResult<StoreSettings>;
    fn update_settings(&self, updates: &UpdateStoreSettings) -> RepositoryResult<StoreSettings>;
}

use mockall::mock;

use super::{
    BannerReader, BannerWriter, CategoryReader, CategoryWriter, OrderReader, OrderWriter,
    ProductReader, ProductWriter, RepositoryResult, SettingsReader, SettingsWriter, UserReader,
    UserWriter,
};
use crate::domain::{
    banner::{Banner, NewBanner, UpdateBanner},
    category::{Category, NewCategory, UpdateCategory},
    order::{DeliveryStatus, NewOrder, Order, OrderListQuery, PaymentStatus},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    settings::{DefaultSettings, StoreSettings, UpdateStoreSettings},
    user::{NewUser, User},
};

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_brands(&self) -> RepositoryResult<Vec<String>>;
        fn list_fragrance_types(&self) -> RepositoryResult<Vec<String>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn set_payment_status<'a>(&self, order_id: i32, status: PaymentStatus, reference: Option<&'a str>) -> RepositoryResult<Order>;
        fn set_delivery_status(&self, order_id: i32, status: DeliveryStatus) -> RepositoryResult<Order>;
        fn delete_order(&self, order_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub BannerReader {}

    impl BannerReader for BannerReader {
        fn get_banner_by_id(&self, id: i32) -> RepositoryResult<Option<Banner>>;
        fn list_banners(&self, only_active: bool) -> RepositoryResult<Vec<Banner>>;
    }
}

mock! {
    pub BannerWriter {}

    impl BannerWriter for BannerWriter {
        fn create_banner(&self, new_banner: &NewBanner) -> RepositoryResult<Banner>;
        fn update_banner(&self, banner_id: i32, updates: &UpdateBanner) -> RepositoryResult<Banner>;
        fn delete_banner(&self, banner_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn count_users_by_role(&self, role: &str) -> RepositoryResult<usize>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}

mock! {
    pub SettingsReader {}

    impl SettingsReader for SettingsReader {
        fn get_settings(&self) -> RepositoryResult<Option<StoreSettings>>;
    }
}

mock! {
    pub SettingsWriter {}

    impl SettingsWriter for SettingsWriter {
        fn ensure_settings(&self, defaults: &DefaultSettings) -> RepositoryResult<StoreSettings>;
        fn update_settings(&self, updates: &UpdateStoreSettings) -> RepositoryResult<StoreSettings>;
    }
}

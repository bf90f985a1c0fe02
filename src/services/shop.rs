use serde::Deserialize;

use crate::domain::banner::Banner;
use crate::domain::category::Category;
use crate::domain::product::{Product, ProductListQuery, ProductSort};
use crate::domain::settings::{DefaultSettings, StoreSettings};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    BannerReader, CategoryReader, ProductReader, SettingsReader, SettingsWriter,
};
use crate::search::rank_products;
use crate::services::{ServiceError, ServiceResult};

/// Number of featured products shown on the home page.
const FEATURED_LIMIT: usize = 8;
/// Number of related products shown under a product page.
const RELATED_LIMIT: usize = 4;

/// Query parameters accepted by the shop catalog page.
#[derive(Debug, Default, Deserialize)]
pub struct ShopQuery {
    /// Free-text search entered by the shopper.
    pub q: Option<String>,
    /// Comma-separated category ids.
    pub categories: Option<String>,
    /// Comma-separated brand names.
    pub brands: Option<String>,
    /// Comma-separated fragrance types.
    pub fragrance_types: Option<String>,
    /// Price bounds in major units.
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub sort: Option<ProductSort>,
    pub page: Option<usize>,
}

/// Data required to render the home page.
pub struct HomePageData {
    pub banners: Vec<Banner>,
    pub featured: Vec<Product>,
    pub categories: Vec<Category>,
    pub settings: StoreSettings,
}

/// Data required to render the catalog page.
pub struct ShopPageData {
    pub products: Paginated<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<String>,
    pub fragrance_types: Vec<String>,
    pub search: Option<String>,
    pub settings: StoreSettings,
}

/// Data required to render a product detail page.
pub struct ProductPageData {
    pub product: Product,
    pub related: Vec<Product>,
    pub settings: StoreSettings,
}

/// Loads banners, featured products and categories for the home page.
pub fn load_home_page<R>(repo: &R) -> ServiceResult<HomePageData>
where
    R: BannerReader + ProductReader + CategoryReader + SettingsReader + SettingsWriter + ?Sized,
{
    let banners = repo.list_banners(true).map_err(ServiceError::from)?;

    let query = ProductListQuery::new()
        .only_featured()
        .paginate(1, FEATURED_LIMIT);
    let (_, featured) = repo.list_products(query).map_err(ServiceError::from)?;

    let categories = repo.list_categories().map_err(ServiceError::from)?;
    let settings = load_settings(repo)?;

    Ok(HomePageData {
        banners,
        featured,
        categories,
        settings,
    })
}

/// Loads the catalog page, applying structural filters in the database and
/// relevance ranking in memory when a search term is present.
pub fn load_shop_page<R>(repo: &R, query: ShopQuery) -> ServiceResult<ShopPageData>
where
    R: ProductReader + CategoryReader + SettingsReader + SettingsWriter + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let search = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string);

    let mut list_query = ProductListQuery::new()
        .category_ids(parse_id_list(query.categories.as_deref()))
        .brands(parse_name_list(query.brands.as_deref()))
        .fragrance_types(parse_name_list(query.fragrance_types.as_deref()))
        .price_range(
            query.min_price.map(|value| value.saturating_mul(100)),
            query.max_price.map(|value| value.saturating_mul(100)),
        )
        .sort(query.sort.unwrap_or_default());

    let products = match &search {
        Some(term) => {
            // Ranking reorders and drops items, so retrieval cannot be
            // paginated in the database.
            let (_, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
            let ranked = rank_products(items, term);
            Paginated::from_vec(ranked, page, DEFAULT_ITEMS_PER_PAGE)
        }
        None => {
            list_query = list_query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
            let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
            Paginated::new(items, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE))
        }
    };

    let categories = repo.list_categories().map_err(ServiceError::from)?;
    let brands = repo.list_brands().map_err(ServiceError::from)?;
    let fragrance_types = repo.list_fragrance_types().map_err(ServiceError::from)?;
    let settings = load_settings(repo)?;

    Ok(ShopPageData {
        products,
        categories,
        brands,
        fragrance_types,
        search,
        settings,
    })
}

/// Loads a product detail page with related items from the same category.
pub fn load_product_page<R>(repo: &R, product_id: i32) -> ServiceResult<ProductPageData>
where
    R: ProductReader + SettingsReader + SettingsWriter + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .filter(|product| product.is_active)
        .ok_or(ServiceError::NotFound)?;

    let related = match product.category_id {
        Some(category_id) => {
            let query = ProductListQuery::new()
                .category_ids(vec![category_id])
                .paginate(1, RELATED_LIMIT + 1);
            let (_, items) = repo.list_products(query).map_err(ServiceError::from)?;
            items
                .into_iter()
                .filter(|item| item.id != product.id)
                .take(RELATED_LIMIT)
                .collect()
        }
        None => Vec::new(),
    };

    let settings = load_settings(repo)?;

    Ok(ProductPageData {
        product,
        related,
        settings,
    })
}

/// Returns the settings row, creating it from defaults on first use.
pub fn load_settings<R>(repo: &R) -> ServiceResult<StoreSettings>
where
    R: SettingsReader + SettingsWriter + ?Sized,
{
    match repo.get_settings().map_err(ServiceError::from)? {
        Some(settings) => Ok(settings),
        None => repo
            .ensure_settings(&DefaultSettings::default())
            .map_err(ServiceError::from),
    }
}

fn parse_id_list(raw: Option<&str>) -> Vec<i32> {
    raw.map(|value| {
        value
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    })
    .unwrap_or_default()
}

fn parse_name_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::settings::{StoreSettings, UpdateStoreSettings};
    use crate::repository::mock::{
        MockCategoryReader, MockProductReader, MockSettingsReader, MockSettingsWriter,
    };
    use crate::repository::RepositoryResult;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product(id: i32, name: &str) -> Product {
        Product {
            id,
            category_id: Some(1),
            name: name.to_string(),
            brand: "Gucci".to_string(),
            description: None,
            price_cents: 45_000,
            stock: 5,
            fragrance_type: None,
            concentration: None,
            size_ml: None,
            is_featured: false,
            is_active: true,
            images: vec![],
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_settings() -> StoreSettings {
        StoreSettings {
            id: 1,
            store_name: "Parfumerie".to_string(),
            currency: "GHS".to_string(),
            shipping_fee_cents: 0,
            maintenance_mode: false,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    struct FakeRepo {
        product_reader: MockProductReader,
        category_reader: MockCategoryReader,
        settings_reader: MockSettingsReader,
        settings_writer: MockSettingsWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                product_reader: MockProductReader::new(),
                category_reader: MockCategoryReader::new(),
                settings_reader: MockSettingsReader::new(),
                settings_writer: MockSettingsWriter::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
            self.product_reader.get_product_by_id(id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.product_reader.list_products(query)
        }

        fn list_brands(&self) -> RepositoryResult<Vec<String>> {
            self.product_reader.list_brands()
        }

        fn list_fragrance_types(&self) -> RepositoryResult<Vec<String>> {
            self.product_reader.list_fragrance_types()
        }
    }

    impl CategoryReader for FakeRepo {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>> {
            self.category_reader.get_category_by_id(id)
        }

        fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
            self.category_reader.list_categories()
        }
    }

    impl SettingsReader for FakeRepo {
        fn get_settings(&self) -> RepositoryResult<Option<StoreSettings>> {
            self.settings_reader.get_settings()
        }
    }

    impl SettingsWriter for FakeRepo {
        fn ensure_settings(&self, defaults: &DefaultSettings) -> RepositoryResult<StoreSettings> {
            self.settings_writer.ensure_settings(defaults)
        }

        fn update_settings(
            &self,
            updates: &UpdateStoreSettings,
        ) -> RepositoryResult<StoreSettings> {
            self.settings_writer.update_settings(updates)
        }
    }

    #[test]
    fn shop_page_without_search_paginates_in_the_database() {
        let mut repo = FakeRepo::new();

        repo.product_reader
            .expect_list_products()
            .times(1)
            .withf(|query| {
                assert!(query.pagination.is_some());
                assert_eq!(query.category_ids, vec![1, 3]);
                assert_eq!(query.min_price_cents, Some(10_000));
                true
            })
            .returning(|_| Ok((30, vec![sample_product(1, "Bloom")])));
        repo.product_reader
            .expect_list_brands()
            .returning(|| Ok(vec!["Gucci".to_string()]));
        repo.product_reader
            .expect_list_fragrance_types()
            .returning(|| Ok(vec![]));
        repo.category_reader
            .expect_list_categories()
            .returning(|| Ok(vec![]));
        repo.settings_reader
            .expect_get_settings()
            .returning(|| Ok(Some(sample_settings())));

        let query = ShopQuery {
            q: None,
            categories: Some("1, 3, bogus".to_string()),
            brands: None,
            fragrance_types: None,
            min_price: Some(100),
            max_price: None,
            sort: None,
            page: Some(2),
        };

        let data = load_shop_page(&repo, query).expect("expected success");
        assert_eq!(data.products.page, 2);
        assert_eq!(data.products.total_pages, 3);
        assert!(data.search.is_none());
    }

    #[test]
    fn shop_page_with_search_ranks_in_memory() {
        let mut repo = FakeRepo::new();

        repo.product_reader
            .expect_list_products()
            .times(1)
            .withf(|query| {
                // Retrieval must not be paginated when ranking applies.
                assert!(query.pagination.is_none());
                true
            })
            .returning(|_| {
                Ok((3, vec![
                    sample_product(1, "Sauvage"),
                    sample_product(2, "Bloom Nettare"),
                    sample_product(3, "Bloom"),
                ]))
            });
        repo.product_reader
            .expect_list_brands()
            .returning(|| Ok(vec![]));
        repo.product_reader
            .expect_list_fragrance_types()
            .returning(|| Ok(vec![]));
        repo.category_reader
            .expect_list_categories()
            .returning(|| Ok(vec![]));
        repo.settings_reader
            .expect_get_settings()
            .returning(|| Ok(Some(sample_settings())));

        let query = ShopQuery {
            q: Some("bloom".to_string()),
            ..ShopQuery::default()
        };

        let data = load_shop_page(&repo, query).expect("expected success");
        let ids: Vec<i32> = data.products.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn product_page_hides_inactive_products() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| {
                let mut product = sample_product(id, "Bloom");
                product.is_active = false;
                Ok(Some(product))
            });

        let result = load_product_page(&repo, 5);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn product_page_excludes_itself_from_related() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, "Bloom"))));
        repo.product_reader
            .expect_list_products()
            .returning(|_| {
                Ok((3, vec![
                    sample_product(5, "Bloom"),
                    sample_product(6, "Flora"),
                    sample_product(7, "Guilty"),
                ]))
            });
        repo.settings_reader
            .expect_get_settings()
            .returning(|| Ok(Some(sample_settings())));

        let data = load_product_page(&repo, 5).expect("expected success");
        let ids: Vec<i32> = data.related.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![6, 7]);
    }

    #[test]
    fn settings_are_created_on_first_read() {
        let mut repo = FakeRepo::new();
        repo.settings_reader
            .expect_get_settings()
            .returning(|| Ok(None));
        repo.settings_writer
            .expect_ensure_settings()
            .times(1)
            .returning(|_| Ok(sample_settings()));

        let settings = load_settings(&repo).expect("expected defaults");
        assert_eq!(settings.currency, "GHS");
    }
}

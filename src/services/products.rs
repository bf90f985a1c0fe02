use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CategoryReader, ProductReader, ProductWriter};
use crate::search::rank_products;
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Query parameters accepted by the back-office products page.
#[derive(Debug, Default, Deserialize)]
pub struct AdminProductsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the back-office products page.
pub struct AdminProductsPageData {
    pub products: Paginated<Product>,
    pub categories: Vec<Category>,
    pub search: Option<String>,
}

/// Loads the back-office product table, inactive products included.
pub fn load_products_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: AdminProductsQuery,
) -> ServiceResult<AdminProductsPageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    ensure_admin(user)?;

    let page = query.page.unwrap_or(1).max(1);
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string);

    let list_query = ProductListQuery::new().include_inactive();

    let products = match &search {
        Some(term) => {
            let (_, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
            let ranked = rank_products(items, term);
            Paginated::from_vec(ranked, page, DEFAULT_ITEMS_PER_PAGE)
        }
        None => {
            let paged_query = list_query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
            let (total, items) = repo.list_products(paged_query).map_err(ServiceError::from)?;
            Paginated::new(items, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE))
        }
    };

    let categories = repo.list_categories().map_err(ServiceError::from)?;

    Ok(AdminProductsPageData {
        products,
        categories,
        search,
    })
}

/// Creates a catalog product from the add form.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;
    log::info!("product {} created by user {}", created.id, user.id);

    Ok(created)
}

/// Applies an edit form to an existing product.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_admin(user)?;

    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_product(product_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a product. Past order lines keep their snapshot of it.
pub fn delete_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.delete_product(product_id).map_err(ServiceError::from)
}

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery, ProductSort,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, NewProductImage as DbNewProductImage, Product as DbProduct,
        ProductImage as DbProductImage, UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryError,
        RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        if let Some(db_product) = product {
            let mut images = load_images_for_products(&mut conn, &[db_product.id])?;
            let image_urls = images.remove(&db_product.id).unwrap_or_default();
            Ok(Some(db_product.into_domain(image_urls)))
        } else {
            Ok(None)
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let total = apply_filters(products::table.into_boxed(), &query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = apply_filters(products::table.into_boxed(), &query);

        items = match query.sort {
            ProductSort::Newest => items.order(products::created_at.desc()),
            ProductSort::PriceAsc => items.order(products::price_cents.asc()),
            ProductSort::PriceDesc => items.order(products::price_cents.desc()),
        };

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;
        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let mut image_map = load_images_for_products(&mut conn, &product_ids)?;

        let domain_products = db_products
            .into_iter()
            .map(|db_product| {
                let images = image_map.remove(&db_product.id).unwrap_or_default();
                db_product.into_domain(images)
            })
            .collect();

        Ok((total, domain_products))
    }

    fn list_brands(&self) -> RepositoryResult<Vec<String>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let brands = products::table
            .filter(products::is_active.eq(true))
            .select(products::brand)
            .distinct()
            .order(products::brand.asc())
            .load::<String>(&mut conn)?;

        Ok(brands)
    }

    fn list_fragrance_types(&self) -> RepositoryResult<Vec<String>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let types = products::table
            .filter(products::is_active.eq(true))
            .filter(products::fragrance_type.is_not_null())
            .select(products::fragrance_type)
            .distinct()
            .order(products::fragrance_type.asc())
            .load::<Option<String>>(&mut conn)?;

        Ok(types.into_iter().flatten().collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let db_new = DbNewProduct::from(new_product);

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            if !new_product.images.is_empty() {
                let payload: Vec<DbNewProductImage> = new_product
                    .images
                    .iter()
                    .enumerate()
                    .map(|(position, url)| DbNewProductImage {
                        product_id: created.id,
                        url,
                        position: position as i32,
                    })
                    .collect();

                diesel::insert_into(product_images::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            Ok(created.into_domain(new_product.images.clone()))
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateProduct::from(updates);

            let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            if let Some(images) = updates.images.as_ref() {
                diesel::delete(
                    product_images::table.filter(product_images::product_id.eq(product_id)),
                )
                .execute(conn)?;

                if !images.is_empty() {
                    let payload: Vec<DbNewProductImage> = images
                        .iter()
                        .enumerate()
                        .map(|(position, url)| DbNewProductImage {
                            product_id,
                            url,
                            position: position as i32,
                        })
                        .collect();

                    diesel::insert_into(product_images::table)
                        .values(&payload)
                        .execute(conn)?;
                }
            }

            let mut image_map = load_images_for_products(conn, &[product_id])?;
            let images = image_map.remove(&product_id).unwrap_or_default();

            Ok(updated.into_domain(images))
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn apply_filters<'a>(
    mut query: crate::schema::products::BoxedQuery<'a, diesel::sqlite::Sqlite>,
    list_query: &'a ProductListQuery,
) -> crate::schema::products::BoxedQuery<'a, diesel::sqlite::Sqlite> {
    use crate::schema::products;

    if !list_query.include_inactive {
        query = query.filter(products::is_active.eq(true));
    }

    if list_query.only_featured {
        query = query.filter(products::is_featured.eq(true));
    }

    if !list_query.category_ids.is_empty() {
        query = query.filter(products::category_id.eq_any(
            list_query
                .category_ids
                .iter()
                .map(|id| Some(*id))
                .collect::<Vec<_>>(),
        ));
    }

    if !list_query.brands.is_empty() {
        query = query.filter(products::brand.eq_any(&list_query.brands));
    }

    if !list_query.fragrance_types.is_empty() {
        query = query.filter(products::fragrance_type.eq_any(
            list_query
                .fragrance_types
                .iter()
                .map(|value| Some(value.clone()))
                .collect::<Vec<_>>(),
        ));
    }

    if let Some(min) = list_query.min_price_cents {
        query = query.filter(products::price_cents.ge(min));
    }

    if let Some(max) = list_query.max_price_cents {
        query = query.filter(products::price_cents.le(max));
    }

    query
}

fn load_images_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<String>>> {
    use crate::schema::product_images;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_images::table
        .filter(product_images::product_id.eq_any(product_ids))
        .order((product_images::position.asc(), product_images::id.asc()))
        .load::<DbProductImage>(conn)?;

    let mut map: HashMap<i32, Vec<String>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row.url);
    }

    Ok(map)
}

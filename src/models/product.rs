use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub stock: i32,
    pub fragrance_type: Option<String>,
    pub concentration: Option<String>,
    pub size_ml: Option<i32>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_images)]
#[diesel(belongs_to(Product, foreign_key = product_id))]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub url: String,
    pub position: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub category_id: Option<i32>,
    pub name: &'a str,
    pub brand: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i32,
    pub stock: i32,
    pub fragrance_type: Option<&'a str>,
    pub concentration: Option<&'a str>,
    pub size_ml: Option<i32>,
    pub is_featured: bool,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub product_id: i32,
    pub url: &'a str,
    pub position: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub category_id: Option<Option<i32>>,
    pub name: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub price_cents: Option<i32>,
    pub stock: Option<i32>,
    pub fragrance_type: Option<Option<&'a str>>,
    pub concentration: Option<Option<&'a str>>,
    pub size_ml: Option<Option<i32>>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn into_domain(self, images: Vec<String>) -> DomainProduct {
        DomainProduct {
            id: self.id,
            category_id: self.category_id,
            name: self.name,
            brand: self.brand,
            description: self.description,
            price_cents: self.price_cents,
            stock: self.stock,
            fragrance_type: self.fragrance_type,
            concentration: self.concentration,
            size_ml: self.size_ml,
            is_featured: self.is_featured,
            is_active: self.is_active,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        value.into_domain(Vec::new())
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            brand: value.brand.as_str(),
            description: value.description.as_deref(),
            price_cents: value.price_cents,
            stock: value.stock,
            fragrance_type: value.fragrance_type.as_deref(),
            concentration: value.concentration.as_deref(),
            size_ml: value.size_ml,
            is_featured: value.is_featured,
            is_active: value.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_deref(),
            brand: value.brand.as_deref(),
            description: value
                .description
                .as_ref()
                .map(|inner| inner.as_deref()),
            price_cents: value.price_cents,
            stock: value.stock,
            fragrance_type: value
                .fragrance_type
                .as_ref()
                .map(|inner| inner.as_deref()),
            concentration: value
                .concentration
                .as_ref()
                .map(|inner| inner.as_deref()),
            size_ml: value.size_ml,
            is_featured: value.is_featured,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}

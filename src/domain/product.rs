use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a perfume in the catalog.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning category, if assigned.
    pub category_id: Option<i32>,
    /// Human-readable name of the product.
    pub name: String,
    /// Brand name, e.g. "Yves Saint Laurent".
    pub brand: String,
    /// Optional longer description shown to shoppers.
    pub description: Option<String>,
    /// Price represented in the smallest currency unit.
    pub price_cents: i32,
    /// Units available for sale, never negative.
    pub stock: i32,
    /// Fragrance type, e.g. "Eau de Parfum".
    pub fragrance_type: Option<String>,
    /// Concentration descriptor, e.g. "15%".
    pub concentration: Option<String>,
    /// Bottle size in millilitres.
    pub size_ml: Option<i32>,
    /// Whether the product is highlighted on the home page.
    pub is_featured: bool,
    /// Whether the product is visible on the storefront.
    pub is_active: bool,
    /// Ordered list of image URLs.
    pub images: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Whether a shopper can order `quantity` units right now.
    pub fn has_stock(&self, quantity: i32) -> bool {
        self.is_active && self.stock >= quantity
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
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
    /// Ordered image URLs stored alongside the product.
    pub images: Vec<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, brand: impl Into<String>, price_cents: i32) -> Self {
        Self {
            category_id: None,
            name: name.into(),
            brand: brand.into(),
            description: None,
            price_cents,
            stock: 0,
            fragrance_type: None,
            concentration: None,
            size_ml: None,
            is_featured: false,
            is_active: true,
            images: Vec::new(),
        }
    }

    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_fragrance_type(mut self, fragrance_type: impl Into<String>) -> Self {
        self.fragrance_type = Some(fragrance_type.into());
        self
    }

    pub fn with_concentration(mut self, concentration: impl Into<String>) -> Self {
        self.concentration = Some(concentration.into());
        self
    }

    pub fn with_size_ml(mut self, size_ml: i32) -> Self {
        self.size_ml = Some(size_ml);
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub category_id: Option<Option<i32>>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<Option<String>>,
    pub price_cents: Option<i32>,
    pub stock: Option<i32>,
    pub fragrance_type: Option<Option<String>>,
    pub concentration: Option<Option<String>>,
    pub size_ml: Option<Option<i32>>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    /// Replaces the whole ordered image list when present.
    pub images: Option<Vec<String>>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    pub fn new() -> Self {
        Self {
            category_id: None,
            name: None,
            brand: None,
            description: None,
            price_cents: None,
            stock: None,
            fragrance_type: None,
            concentration: None,
            size_ml: None,
            is_featured: None,
            is_active: None,
            images: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn category_id(mut self, category_id: Option<i32>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(Into::into));
        self
    }

    pub fn price_cents(mut self, price_cents: i32) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn fragrance_type(mut self, fragrance_type: Option<impl Into<String>>) -> Self {
        self.fragrance_type = Some(fragrance_type.map(Into::into));
        self
    }

    pub fn concentration(mut self, concentration: Option<impl Into<String>>) -> Self {
        self.concentration = Some(concentration.map(Into::into));
        self
    }

    pub fn size_ml(mut self, size_ml: Option<i32>) -> Self {
        self.size_ml = Some(size_ml);
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }
}

/// Sort order applied to product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict to these categories when non-empty.
    pub category_ids: Vec<i32>,
    /// Restrict to these brands when non-empty.
    pub brands: Vec<String>,
    /// Restrict to these fragrance types when non-empty.
    pub fragrance_types: Vec<String>,
    pub min_price_cents: Option<i32>,
    pub max_price_cents: Option<i32>,
    /// Only products flagged as featured.
    pub only_featured: bool,
    /// Include inactive products (back-office listings).
    pub include_inactive: bool,
    pub sort: ProductSort,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_ids(mut self, category_ids: Vec<i32>) -> Self {
        self.category_ids = category_ids;
        self
    }

    pub fn brands(mut self, brands: Vec<String>) -> Self {
        self.brands = brands;
        self
    }

    pub fn fragrance_types(mut self, fragrance_types: Vec<String>) -> Self {
        self.fragrance_types = fragrance_types;
        self
    }

    pub fn price_range(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_price_cents = min;
        self.max_price_cents = max;
        self
    }

    pub fn only_featured(mut self) -> Self {
        self.only_featured = true;
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

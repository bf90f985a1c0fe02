use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

const NAME_MAX_LEN: u64 = 128;
const BRAND_MAX_LEN: u64 = 128;

pub type ProductFormResult<T> = Result<T, ProductFormError>;

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("brand cannot be empty")]
    EmptyBrand,
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    #[error("stock cannot be negative")]
    NegativeStock,
}

/// Form payload emitted when submitting the "Add product" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = BRAND_MAX_LEN))]
    pub brand: String,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    /// Price in major units, e.g. `450.00`.
    pub price: String,
    pub stock: i32,
    pub fragrance_type: Option<String>,
    pub concentration: Option<String>,
    pub size_ml: Option<i32>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Image URLs, one per line.
    pub images: Option<String>,
}

fn default_active() -> bool {
    true
}

impl AddProductForm {
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let brand = sanitize_inline_text(&self.brand);
        if brand.is_empty() {
            return Err(ProductFormError::EmptyBrand);
        }

        if self.stock < 0 {
            return Err(ProductFormError::NegativeStock);
        }

        let price_cents = parse_price_cents(&self.price)?;

        let mut new_product = NewProduct::new(name, brand, price_cents)
            .with_stock(self.stock)
            .featured(self.is_featured)
            .active(self.is_active);

        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category_id(category_id);
        }

        if let Some(description) = sanitized_multiline(self.description.as_deref()) {
            new_product = new_product.with_description(description);
        }

        if let Some(fragrance_type) = sanitized_inline(self.fragrance_type.as_deref()) {
            new_product = new_product.with_fragrance_type(fragrance_type);
        }

        if let Some(concentration) = sanitized_inline(self.concentration.as_deref()) {
            new_product = new_product.with_concentration(concentration);
        }

        if let Some(size_ml) = self.size_ml {
            new_product = new_product.with_size_ml(size_ml);
        }

        if let Some(raw) = self.images.as_deref() {
            let images = parse_image_lines(raw);
            if !images.is_empty() {
                new_product = new_product.with_images(images);
            }
        }

        Ok(new_product)
    }
}

/// Form payload emitted when editing an existing product. Absent fields are
/// left untouched; empty optional fields clear the stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = BRAND_MAX_LEN))]
    pub brand: Option<String>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<i32>,
    pub fragrance_type: Option<String>,
    pub concentration: Option<String>,
    pub size_ml: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub images: Option<String>,
}

impl EditProductForm {
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(brand) = self.brand {
            let sanitized = sanitize_inline_text(&brand);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyBrand);
            }
            updates = updates.brand(sanitized);
        }

        if let Some(category_id) = self.category_id {
            updates = updates.category_id(Some(category_id));
        }

        if let Some(description) = self.description {
            let sanitized = sanitize_multiline_text(&description);
            if sanitized.is_empty() {
                updates = updates.description(None::<String>);
            } else {
                updates = updates.description(Some(sanitized));
            }
        }

        if let Some(price) = self.price {
            updates = updates.price_cents(parse_price_cents(&price)?);
        }

        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(ProductFormError::NegativeStock);
            }
            updates = updates.stock(stock);
        }

        if let Some(fragrance_type) = self.fragrance_type {
            let sanitized = sanitize_inline_text(&fragrance_type);
            if sanitized.is_empty() {
                updates = updates.fragrance_type(None::<String>);
            } else {
                updates = updates.fragrance_type(Some(sanitized));
            }
        }

        if let Some(concentration) = self.concentration {
            let sanitized = sanitize_inline_text(&concentration);
            if sanitized.is_empty() {
                updates = updates.concentration(None::<String>);
            } else {
                updates = updates.concentration(Some(sanitized));
            }
        }

        if let Some(size_ml) = self.size_ml {
            updates = updates.size_ml(Some(size_ml));
        }

        if let Some(is_featured) = self.is_featured {
            updates = updates.featured(is_featured);
        }

        if let Some(is_active) = self.is_active {
            updates = updates.active(is_active);
        }

        if let Some(raw) = self.images {
            updates = updates.images(parse_image_lines(&raw));
        }

        Ok(updates)
    }
}

fn sanitized_inline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

fn sanitized_multiline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_multiline_text)
        .filter(|value| !value.is_empty())
}

fn parse_image_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a decimal amount in major units into cents without going through
/// floating point. At most two fractional digits are accepted.
fn parse_price_cents(input: &str) -> ProductFormResult<i32> {
    let trimmed = input.trim();
    let invalid = || ProductFormError::InvalidPrice {
        value: trimmed.to_string(),
    };

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }

    if fraction.len() > 2 || !fraction.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };

    if whole_value < 0 {
        return Err(invalid());
    }

    let fraction_value: i64 = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<2}");
        padded.parse().map_err(|_| invalid())?
    };

    let cents = whole_value
        .checked_mul(100)
        .and_then(|value| value.checked_add(fraction_value))
        .ok_or_else(invalid)?;

    i32::try_from(cents).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_parsing_handles_fractions() {
        assert_eq!(parse_price_cents("450").unwrap(), 45_000);
        assert_eq!(parse_price_cents("450.5").unwrap(), 45_050);
        assert_eq!(parse_price_cents("450.05").unwrap(), 45_005);
        assert_eq!(parse_price_cents(" 0.99 ").unwrap(), 99);
    }

    #[test]
    fn price_parsing_rejects_garbage() {
        assert!(parse_price_cents("").is_err());
        assert!(parse_price_cents("abc").is_err());
        assert!(parse_price_cents("1.999").is_err());
        assert!(parse_price_cents("-5").is_err());
    }

    #[test]
    fn add_form_builds_a_new_product() {
        let form = AddProductForm {
            name: "  Black   Opium ".to_string(),
            brand: "Yves Saint Laurent".to_string(),
            category_id: Some(3),
            description: Some("\nCoffee and vanilla.\n\n".to_string()),
            price: "780.00".to_string(),
            stock: 12,
            fragrance_type: Some("Eau de Parfum".to_string()),
            concentration: None,
            size_ml: Some(90),
            is_featured: true,
            is_active: true,
            images: Some("https://cdn.test/a.jpg\n\n https://cdn.test/b.jpg \n".to_string()),
        };

        let new_product = form.into_new_product().expect("valid form");
        assert_eq!(new_product.name, "Black Opium");
        assert_eq!(new_product.price_cents, 78_000);
        assert_eq!(new_product.category_id, Some(3));
        assert_eq!(new_product.images.len(), 2);
        assert!(new_product.is_featured);
    }

    #[test]
    fn edit_form_clears_description_with_empty_string() {
        let form = EditProductForm {
            name: None,
            brand: None,
            category_id: None,
            description: Some("   ".to_string()),
            price: None,
            stock: None,
            fragrance_type: None,
            concentration: None,
            size_ml: None,
            is_featured: None,
            is_active: None,
            images: None,
        };

        let updates = form.into_update_product().expect("valid form");
        assert_eq!(updates.description, Some(None));
        assert!(updates.name.is_none());
    }

    #[test]
    fn negative_stock_is_rejected() {
        let form = AddProductForm {
            name: "Bloom".to_string(),
            brand: "Gucci".to_string(),
            category_id: None,
            description: None,
            price: "450".to_string(),
            stock: -1,
            fragrance_type: None,
            concentration: None,
            size_ml: None,
            is_featured: false,
            is_active: true,
            images: None,
        };

        assert!(matches!(
            form.into_new_product(),
            Err(ProductFormError::NegativeStock)
        ));
    }
}

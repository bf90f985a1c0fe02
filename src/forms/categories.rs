use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

const NAME_MAX_LEN: u64 = 128;

pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("category name cannot be empty")]
    EmptyName,
}

/// Form payload emitted when submitting the "Add category" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

impl AddCategoryForm {
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let mut new_category = NewCategory::new(name);

        let description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());
        if let Some(description) = description {
            new_category = new_category.with_description(description);
        }

        let image_url = self
            .image_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        if let Some(image_url) = image_url {
            new_category = new_category.with_image_url(image_url);
        }

        Ok(new_category)
    }
}

/// Form payload emitted when editing an existing category.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl EditCategoryForm {
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let mut updates = UpdateCategory::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(CategoryFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(description) = self.description {
            let sanitized = sanitize_multiline_text(&description);
            if sanitized.is_empty() {
                updates = updates.description(None::<String>);
            } else {
                updates = updates.description(Some(sanitized));
            }
        }

        if let Some(image_url) = self.image_url {
            let trimmed = image_url.trim().to_string();
            if trimmed.is_empty() {
                updates = updates.image_url(None::<String>);
            } else {
                updates = updates.image_url(Some(trimmed));
            }
        }

        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_sanitizes_name() {
        let form = AddCategoryForm {
            name: "  Eau  de  Parfum ".to_string(),
            description: None,
            image_url: None,
        };

        let new_category = form.into_new_category().expect("valid form");
        assert_eq!(new_category.name, "Eau de Parfum");
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = AddCategoryForm {
            name: " \t ".to_string(),
            description: None,
            image_url: None,
        };

        assert!(form.into_new_category().is_err());
    }
}

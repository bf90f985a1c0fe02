use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::banner::{NewBanner, UpdateBanner};
use crate::forms::sanitize_inline_text;

const LABEL_MAX_LEN: u64 = 256;

pub type BannerFormResult<T> = Result<T, BannerFormError>;

#[derive(Debug, Error)]
pub enum BannerFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("banner label cannot be empty")]
    EmptyLabel,
    #[error("banner image URL cannot be empty")]
    EmptyImageUrl,
}

/// Form payload emitted when submitting the "Add banner" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddBannerForm {
    #[validate(length(min = 1, max = LABEL_MAX_LEN))]
    pub label: String,
    #[validate(url)]
    pub image_url: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl AddBannerForm {
    pub fn into_new_banner(self) -> BannerFormResult<NewBanner> {
        self.validate()?;

        let label = sanitize_inline_text(&self.label);
        if label.is_empty() {
            return Err(BannerFormError::EmptyLabel);
        }

        let image_url = self.image_url.trim().to_string();
        if image_url.is_empty() {
            return Err(BannerFormError::EmptyImageUrl);
        }

        Ok(NewBanner::new(label, image_url).active(self.is_active))
    }
}

/// Form payload emitted when editing an existing banner.
#[derive(Debug, Deserialize, Validate)]
pub struct EditBannerForm {
    #[validate(length(min = 1, max = LABEL_MAX_LEN))]
    pub label: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl EditBannerForm {
    pub fn into_update_banner(self) -> BannerFormResult<UpdateBanner> {
        self.validate()?;

        let mut updates = UpdateBanner::new();

        if let Some(label) = self.label {
            let sanitized = sanitize_inline_text(&label);
            if sanitized.is_empty() {
                return Err(BannerFormError::EmptyLabel);
            }
            updates = updates.label(sanitized);
        }

        if let Some(image_url) = self.image_url {
            let trimmed = image_url.trim().to_string();
            if trimmed.is_empty() {
                return Err(BannerFormError::EmptyImageUrl);
            }
            updates = updates.image_url(trimmed);
        }

        if let Some(is_active) = self.is_active {
            updates = updates.active(is_active);
        }

        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_defaults_to_active() {
        let form = AddBannerForm {
            label: "Summer sale".to_string(),
            image_url: "https://cdn.test/banner.jpg".to_string(),
            is_active: true,
        };

        let banner = form.into_new_banner().expect("valid form");
        assert!(banner.is_active);
        assert_eq!(banner.label, "Summer sale");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let form = AddBannerForm {
            label: "Summer sale".to_string(),
            image_url: "not a url".to_string(),
            is_active: true,
        };

        assert!(matches!(
            form.into_new_banner(),
            Err(BannerFormError::Validation(_))
        ));
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Promotional banner shown on the storefront home page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Banner {
    pub id: i32,
    pub label: String,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new banner.
#[derive(Debug, Clone)]
pub struct NewBanner {
    pub label: String,
    pub image_url: String,
    pub is_active: bool,
}

impl NewBanner {
    pub fn new(label: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image_url: image_url.into(),
            is_active: true,
        }
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Patch data applied when updating an existing banner.
#[derive(Debug, Clone, Default)]
pub struct UpdateBanner {
    pub label: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

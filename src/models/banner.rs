use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::banner::{
    Banner as DomainBanner, NewBanner as DomainNewBanner, UpdateBanner as DomainUpdateBanner,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::banners)]
pub struct Banner {
    pub id: i32,
    pub label: String,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::banners)]
pub struct NewBanner<'a> {
    pub label: &'a str,
    pub image_url: &'a str,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::banners)]
pub struct UpdateBanner<'a> {
    pub label: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Banner> for DomainBanner {
    fn from(value: Banner) -> Self {
        Self {
            id: value.id,
            label: value.label,
            image_url: value.image_url,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewBanner> for NewBanner<'a> {
    fn from(value: &'a DomainNewBanner) -> Self {
        Self {
            label: value.label.as_str(),
            image_url: value.image_url.as_str(),
            is_active: value.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateBanner> for UpdateBanner<'a> {
    fn from(value: &'a DomainUpdateBanner) -> Self {
        Self {
            label: value.label.as_deref(),
            image_url: value.image_url.as_deref(),
            is_active: value.is_active,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

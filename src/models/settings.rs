use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::settings::{
    DefaultSettings, StoreSettings as DomainStoreSettings,
    UpdateStoreSettings as DomainUpdateStoreSettings,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::store_settings)]
pub struct StoreSettings {
    pub id: i32,
    pub store_name: String,
    pub currency: String,
    pub shipping_fee_cents: i32,
    pub maintenance_mode: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::store_settings)]
pub struct NewStoreSettings<'a> {
    pub store_name: &'a str,
    pub currency: &'a str,
    pub shipping_fee_cents: i32,
    pub maintenance_mode: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::store_settings)]
pub struct UpdateStoreSettings<'a> {
    pub store_name: Option<&'a str>,
    pub currency: Option<&'a str>,
    pub shipping_fee_cents: Option<i32>,
    pub maintenance_mode: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<StoreSettings> for DomainStoreSettings {
    fn from(value: StoreSettings) -> Self {
        Self {
            id: value.id,
            store_name: value.store_name,
            currency: value.currency,
            shipping_fee_cents: value.shipping_fee_cents,
            maintenance_mode: value.maintenance_mode,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DefaultSettings> for NewStoreSettings<'a> {
    fn from(value: &'a DefaultSettings) -> Self {
        Self {
            store_name: value.store_name.as_str(),
            currency: value.currency.as_str(),
            shipping_fee_cents: value.shipping_fee_cents,
            maintenance_mode: false,
        }
    }
}

impl<'a> From<&'a DomainUpdateStoreSettings> for UpdateStoreSettings<'a> {
    fn from(value: &'a DomainUpdateStoreSettings) -> Self {
        Self {
            store_name: value.store_name.as_deref(),
            currency: value.currency.as_deref(),
            shipping_fee_cents: value.shipping_fee_cents,
            maintenance_mode: value.maintenance_mode,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Store-wide configuration, a single persisted row created with defaults
/// on first read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSettings {
    pub id: i32,
    pub store_name: String,
    pub currency: String,
    /// Flat delivery fee added to every order.
    pub shipping_fee_cents: i32,
    pub maintenance_mode: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Defaults used when no settings row exists yet.
#[derive(Debug, Clone)]
pub struct DefaultSettings {
    pub store_name: String,
    pub currency: String,
    pub shipping_fee_cents: i32,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            store_name: "Parfumerie".to_string(),
            currency: "GHS".to_string(),
            shipping_fee_cents: 0,
        }
    }
}

/// Patch data applied when updating the settings row.
#[derive(Debug, Clone, Default)]
pub struct UpdateStoreSettings {
    pub store_name: Option<String>,
    pub currency: Option<String>,
    pub shipping_fee_cents: Option<i32>,
    pub maintenance_mode: Option<bool>,
}

impl UpdateStoreSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_name(mut self, store_name: impl Into<String>) -> Self {
        self.store_name = Some(store_name.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn shipping_fee_cents(mut self, shipping_fee_cents: i32) -> Self {
        self.shipping_fee_cents = Some(shipping_fee_cents);
        self
    }

    pub fn maintenance_mode(mut self, maintenance_mode: bool) -> Self {
        self.maintenance_mode = Some(maintenance_mode);
        self
    }
}

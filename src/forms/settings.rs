use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::settings::UpdateStoreSettings;
use crate::forms::sanitize_inline_text;

const STORE_NAME_MAX_LEN: u64 = 128;
const CURRENCY_CODE_LEN: u64 = 3;

pub type SettingsFormResult<T> = Result<T, SettingsFormError>;

#[derive(Debug, Error)]
pub enum SettingsFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("store name cannot be empty")]
    EmptyStoreName,
    #[error("invalid currency code `{value}`")]
    InvalidCurrency { value: String },
    #[error("shipping fee cannot be negative")]
    NegativeShippingFee,
}

/// Form payload emitted by the back-office settings page.
#[derive(Debug, Deserialize, Validate)]
pub struct EditSettingsForm {
    #[validate(length(min = 1, max = STORE_NAME_MAX_LEN))]
    pub store_name: Option<String>,
    #[validate(length(equal = CURRENCY_CODE_LEN))]
    pub currency: Option<String>,
    pub shipping_fee_cents: Option<i32>,
    pub maintenance_mode: Option<bool>,
}

impl EditSettingsForm {
    pub fn into_update_settings(self) -> SettingsFormResult<UpdateStoreSettings> {
        self.validate()?;

        let mut updates = UpdateStoreSettings::new();

        if let Some(store_name) = self.store_name {
            let sanitized = sanitize_inline_text(&store_name);
            if sanitized.is_empty() {
                return Err(SettingsFormError::EmptyStoreName);
            }
            updates = updates.store_name(sanitized);
        }

        if let Some(currency) = self.currency {
            let trimmed = currency.trim();
            if !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) || trimmed.len() != 3 {
                return Err(SettingsFormError::InvalidCurrency {
                    value: trimmed.to_string(),
                });
            }
            updates = updates.currency(trimmed.to_ascii_uppercase());
        }

        if let Some(shipping_fee_cents) = self.shipping_fee_cents {
            if shipping_fee_cents < 0 {
                return Err(SettingsFormError::NegativeShippingFee);
            }
            updates = updates.shipping_fee_cents(shipping_fee_cents);
        }

        if let Some(maintenance_mode) = self.maintenance_mode {
            updates = updates.maintenance_mode(maintenance_mode);
        }

        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_uppercased() {
        let form = EditSettingsForm {
            store_name: None,
            currency: Some("ghs".to_string()),
            shipping_fee_cents: Some(1500),
            maintenance_mode: None,
        };

        let updates = form.into_update_settings().expect("valid form");
        assert_eq!(updates.currency.as_deref(), Some("GHS"));
        assert_eq!(updates.shipping_fee_cents, Some(1500));
    }

    #[test]
    fn negative_shipping_fee_is_rejected() {
        let form = EditSettingsForm {
            store_name: None,
            currency: None,
            shipping_fee_cents: Some(-1),
            maintenance_mode: None,
        };

        assert!(matches!(
            form.into_update_settings(),
            Err(SettingsFormError::NegativeShippingFee)
        ));
    }
}

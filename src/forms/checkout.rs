use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::cart::Cart;
use crate::domain::order::PaymentMethod;
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

const RECIPIENT_MAX_LEN: u64 = 128;
const PHONE_MAX_LEN: u64 = 32;
const ADDRESS_MAX_LEN: u64 = 512;

pub type CheckoutFormResult<T> = Result<T, CheckoutFormError>;

#[derive(Debug, Error)]
pub enum CheckoutFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("cart payload is not valid")]
    InvalidCart,
    #[error("unknown payment method `{value}`")]
    UnknownPaymentMethod { value: String },
    #[error("recipient name cannot be empty")]
    EmptyRecipient,
    #[error("delivery address cannot be empty")]
    EmptyAddress,
}

/// Form payload posted from the checkout page. The cart travels as a JSON
/// string because it lives in browser storage, not in a server session.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutForm {
    /// JSON-encoded cart, an array of line items.
    pub cart: String,
    #[validate(length(min = 1, max = RECIPIENT_MAX_LEN))]
    pub recipient_name: String,
    #[validate(length(min = 3, max = PHONE_MAX_LEN))]
    pub phone: String,
    #[validate(length(min = 1, max = ADDRESS_MAX_LEN))]
    pub address: String,
    pub payment_method: String,
    /// Total the shopper saw, in the smallest currency unit. Recomputed and
    /// checked server-side before an order is created.
    pub total_cents: i64,
}

/// Checkout data after validation, ready for the checkout service.
#[derive(Debug, Clone)]
pub struct CheckoutData {
    pub cart: Cart,
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub total_cents: i64,
}

impl CheckoutForm {
    pub fn into_checkout_data(self) -> CheckoutFormResult<CheckoutData> {
        self.validate()?;

        let items = serde_json::from_str(&self.cart).map_err(|_| CheckoutFormError::InvalidCart)?;
        let cart = Cart::new(items);

        let payment_method = PaymentMethod::parse(self.payment_method.trim()).ok_or_else(|| {
            CheckoutFormError::UnknownPaymentMethod {
                value: self.payment_method.clone(),
            }
        })?;

        let recipient_name = sanitize_inline_text(&self.recipient_name);
        if recipient_name.is_empty() {
            return Err(CheckoutFormError::EmptyRecipient);
        }

        let address = sanitize_multiline_text(&self.address);
        if address.is_empty() {
            return Err(CheckoutFormError::EmptyAddress);
        }

        Ok(CheckoutData {
            cart,
            recipient_name,
            phone: sanitize_inline_text(&self.phone),
            address,
            payment_method,
            total_cents: self.total_cents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form(cart: &str) -> CheckoutForm {
        CheckoutForm {
            cart: cart.to_string(),
            recipient_name: "Ama Mensah".to_string(),
            phone: "+233201234567".to_string(),
            address: "12 Oxford Street\nOsu, Accra".to_string(),
            payment_method: "momo".to_string(),
            total_cents: 46_500,
        }
    }

    #[test]
    fn parses_a_json_cart() {
        let cart = r#"[
            {"product_id": 1, "name": "Libre", "quantity": 2, "unit_price_cents": 45000}
        ]"#;

        let data = base_form(cart).into_checkout_data().expect("valid form");
        assert_eq!(data.cart.items.len(), 1);
        assert_eq!(data.cart.items[0].quantity, 2);
        assert_eq!(data.payment_method, PaymentMethod::Momo);
    }

    #[test]
    fn rejects_malformed_cart_json() {
        let result = base_form("{not json").into_checkout_data();
        assert!(matches!(result, Err(CheckoutFormError::InvalidCart)));
    }

    #[test]
    fn rejects_unknown_payment_method() {
        let mut form = base_form("[]");
        form.payment_method = "cheque".to_string();
        assert!(matches!(
            form.into_checkout_data(),
            Err(CheckoutFormError::UnknownPaymentMethod { .. })
        ));
    }
}

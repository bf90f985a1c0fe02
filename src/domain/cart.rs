use serde::{Deserialize, Deserializer, Serialize};

/// A line of the client-persisted cart. The unit price is what the shopper
/// saw when adding the item; the server re-reads the catalog before trusting
/// it for anything. The quantity floor of 1 holds for every construction
/// path, including deserialized cart JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub product_id: i32,
    pub name: String,
    #[serde(deserialize_with = "quantity_floor")]
    pub quantity: i32,
    pub unit_price_cents: i32,
}

fn quantity_floor<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = i32::deserialize(deserializer)?;
    Ok(quantity.max(1))
}

impl CartItem {
    pub fn new(product_id: i32, name: impl Into<String>, quantity: i32, unit_price_cents: i32) -> Self {
        Self {
            product_id,
            name: name.into(),
            // The UI already bounds quantity by stock; the floor of 1 is
            // enforced here because the client is not trusted.
            quantity: quantity.max(1),
            unit_price_cents,
        }
    }
}

/// The shopper's cart as submitted at checkout. Client-persisted and
/// ephemeral; never server-authoritative.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subtotal as displayed to the shopper, before shipping.
    pub fn subtotal_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|item| i64::from(item.unit_price_cents) * i64::from(item.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_is_clamped_to_at_least_one() {
        let item = CartItem::new(1, "Libre", 0, 4500);
        assert_eq!(item.quantity, 1);
        let item = CartItem::new(1, "Libre", -3, 4500);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn quantity_floor_applies_to_deserialized_cart_json() {
        let json = r#"[
            {"product_id": 1, "name": "Libre", "quantity": 0, "unit_price_cents": 4500},
            {"product_id": 2, "name": "Sauvage", "quantity": -2, "unit_price_cents": 6000}
        ]"#;

        let items: Vec<CartItem> = serde_json::from_str(json).expect("valid cart json");
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[1].quantity, 1);
    }

    #[test]
    fn subtotal_sums_lines() {
        let cart = Cart::new(vec![
            CartItem::new(1, "Libre", 2, 4500),
            CartItem::new(2, "Sauvage", 1, 6000),
        ]);
        assert_eq!(cart.subtotal_cents(), 15_000);
    }
}

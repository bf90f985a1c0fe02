use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Payment channel chosen at checkout.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Mobile money, the primary channel.
    Momo,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Momo => "momo",
            Self::Card => "card",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "momo" => Some(Self::Momo),
            "card" => Some(Self::Card),
            _ => None,
        }
    }
}

/// Payment lifecycle. `Success` and `Failed` are terminal.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    pub fn can_transition_to(&self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Success | Self::Failed),
            Self::Success | Self::Failed => false,
        }
    }
}

/// Delivery lifecycle, independent of the payment axis.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Pending → Processing → Completed; Cancelled reachable from any
    /// non-terminal state.
    pub fn can_transition_to(&self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::Processing) => true,
            (Self::Processing, Self::Completed) => true,
            (Self::Pending | Self::Processing, Self::Cancelled) => true,
            _ => false,
        }
    }
}

/// Domain representation of a placed order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    pub id: i32,
    /// Account that placed the order.
    pub user_id: i32,
    /// Items subtotal plus shipping, in the smallest currency unit.
    pub total_cents: i32,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    /// Gateway transaction reference once known.
    pub payment_reference: Option<String>,
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    /// Immutable line items with prices frozen at purchase time.
    pub items: Vec<OrderItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Sum of `price_cents * quantity` over all items.
    pub fn items_subtotal_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|item| i64::from(item.price_cents) * i64::from(item.quantity))
            .sum()
    }
}

/// A single order line, frozen at purchase time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderItem {
    /// Referenced product; `None` once the product is deleted.
    pub product_id: Option<i32>,
    /// Product name snapshot.
    pub name: String,
    pub quantity: i32,
    /// Unit price at the time of purchase, never updated afterwards.
    pub price_cents: i32,
}

/// Payload required to create an order with its items in one unit of work.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub total_cents: i32,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<NewOrderItem>,
}

/// A line of a new order. `quantity` must be validated positive by the
/// caller; the repository decrements stock by exactly this amount.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price_cents: i32,
}

/// Query definition used to list orders.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    /// Restrict to one account's orders (storefront "my orders").
    pub user_id: Option<i32>,
    pub payment_status: Option<PaymentStatus>,
    pub delivery_status: Option<DeliveryStatus>,
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = Some(status);
        self
    }

    pub fn delivery_status(mut self, status: DeliveryStatus) -> Self {
        self.delivery_status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_status_is_terminal_after_success_or_failure() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Success));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Failed));
        assert!(!PaymentStatus::Success.can_transition_to(PaymentStatus::Failed));
        assert!(!PaymentStatus::Failed.can_transition_to(PaymentStatus::Success));
        assert!(!PaymentStatus::Success.can_transition_to(PaymentStatus::Pending));
    }

    #[test]
    fn delivery_status_follows_fulfilment_path() {
        assert!(DeliveryStatus::Pending.can_transition_to(DeliveryStatus::Processing));
        assert!(DeliveryStatus::Processing.can_transition_to(DeliveryStatus::Completed));
        assert!(!DeliveryStatus::Pending.can_transition_to(DeliveryStatus::Completed));
        assert!(!DeliveryStatus::Completed.can_transition_to(DeliveryStatus::Processing));
    }

    #[test]
    fn delivery_can_be_cancelled_until_terminal() {
        assert!(DeliveryStatus::Pending.can_transition_to(DeliveryStatus::Cancelled));
        assert!(DeliveryStatus::Processing.can_transition_to(DeliveryStatus::Cancelled));
        assert!(!DeliveryStatus::Completed.can_transition_to(DeliveryStatus::Cancelled));
        assert!(!DeliveryStatus::Cancelled.can_transition_to(DeliveryStatus::Pending));
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            DeliveryStatus::Pending,
            DeliveryStatus::Processing,
            DeliveryStatus::Completed,
            DeliveryStatus::Cancelled,
        ] {
            assert_eq!(DeliveryStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PaymentStatus::parse("success"), Some(PaymentStatus::Success));
        assert_eq!(PaymentStatus::parse("refunded"), None);
    }
}

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    DeliveryStatus, NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem,
    Order as DomainOrder, OrderItem as DomainOrderItem, PaymentMethod, PaymentStatus,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub total_cents: i32,
    pub currency: String,
    pub payment_method: String,
    pub payment_status: String,
    pub delivery_status: String,
    pub payment_reference: Option<String>,
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub name: String,
    pub quantity: i32,
    pub price_cents: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub total_cents: i32,
    pub currency: &'a str,
    pub payment_method: &'a str,
    pub payment_status: &'a str,
    pub delivery_status: &'a str,
    pub recipient_name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub name: &'a str,
    pub quantity: i32,
    pub price_cents: i32,
}

impl Order {
    pub fn into_domain(self, items: Vec<OrderItem>) -> DomainOrder {
        DomainOrder {
            id: self.id,
            user_id: self.user_id,
            total_cents: self.total_cents,
            currency: self.currency,
            payment_method: PaymentMethod::parse(&self.payment_method)
                .unwrap_or(PaymentMethod::Momo),
            payment_status: PaymentStatus::parse(&self.payment_status).unwrap_or_default(),
            delivery_status: DeliveryStatus::parse(&self.delivery_status).unwrap_or_default(),
            payment_reference: self.payment_reference,
            recipient_name: self.recipient_name,
            phone: self.phone,
            address: self.address,
            items: items.into_iter().map(OrderItem::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl OrderItem {
    pub fn into_domain(self) -> DomainOrderItem {
        DomainOrderItem {
            product_id: self.product_id,
            name: self.name,
            quantity: self.quantity,
            price_cents: self.price_cents,
        }
    }
}

impl From<(Order, Vec<OrderItem>)> for DomainOrder {
    fn from(value: (Order, Vec<OrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            user_id: value.user_id,
            total_cents: value.total_cents,
            currency: value.currency.as_str(),
            payment_method: value.payment_method.as_str(),
            payment_status: PaymentStatus::Pending.as_str(),
            delivery_status: DeliveryStatus::Pending.as_str(),
            recipient_name: value.recipient_name.as_str(),
            phone: value.phone.as_str(),
            address: value.address.as_str(),
        }
    }
}

impl<'a> NewOrderItem<'a> {
    pub fn from_domain(order_id: i32, value: &'a DomainNewOrderItem) -> Self {
        Self {
            order_id,
            product_id: Some(value.product_id),
            name: value.name.as_str(),
            quantity: value.quantity,
            price_cents: value.price_cents,
        }
    }
}

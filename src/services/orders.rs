use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{DeliveryStatus, Order, OrderListQuery, PaymentStatus};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Query parameters accepted by order listings, storefront and back office.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub payment_status: Option<String>,
    pub delivery_status: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render an order listing.
pub struct OrdersPageData {
    pub orders: Paginated<Order>,
    pub payment_status: Option<PaymentStatus>,
    pub delivery_status: Option<DeliveryStatus>,
}

/// Lists the authenticated customer's own orders.
pub fn load_my_orders_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    let list_query = OrderListQuery::new().user_id(user.id);
    load_orders(repo, list_query, query)
}

/// Lists all orders for the back office.
pub fn load_admin_orders_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    ensure_admin(user)?;
    load_orders(repo, OrderListQuery::new(), query)
}

fn load_orders<R>(
    repo: &R,
    mut list_query: OrderListQuery,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);

    let payment_status = query
        .payment_status
        .as_deref()
        .and_then(PaymentStatus::parse);
    let delivery_status = query
        .delivery_status
        .as_deref()
        .and_then(DeliveryStatus::parse);

    if let Some(status) = payment_status {
        list_query = list_query.payment_status(status);
    }
    if let Some(status) = delivery_status {
        list_query = list_query.delivery_status(status);
    }
    list_query = list_query.paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, items) = repo.list_orders(list_query).map_err(ServiceError::from)?;
    let orders = Paginated::new(items, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE));

    Ok(OrdersPageData {
        orders,
        payment_status,
        delivery_status,
    })
}

/// Loads a single order. Customers only see their own orders.
pub fn load_order_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if order.user_id != user.id && !user.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    Ok(order)
}

/// Advances an order's delivery status along the fulfilment path.
pub fn update_delivery_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    next: DeliveryStatus,
) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_admin(user)?;

    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if !order.delivery_status.can_transition_to(next) {
        return Err(ServiceError::InvalidRequest(format!(
            "cannot move delivery from {} to {}",
            order.delivery_status.as_str(),
            next.as_str()
        )));
    }

    repo.set_delivery_status(order_id, next)
        .map_err(ServiceError::from)
}

/// Removes an order entirely. Back office only.
pub fn delete_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<()>
where
    R: OrderWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.delete_order(order_id).map_err(ServiceError::from)
}

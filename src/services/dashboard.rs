use std::collections::BTreeMap;

use chrono::Datelike;

use crate::CUSTOMER_ROLE;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{Order, OrderListQuery, PaymentStatus};
use crate::domain::product::ProductListQuery;
use crate::repository::{OrderReader, ProductReader, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Number of recent sales shown on the dashboard.
const RECENT_SALES_LIMIT: usize = 5;

/// Aggregates shown on the back-office dashboard.
pub struct DashboardData {
    /// Sum of totals over successfully paid orders.
    pub revenue_cents: i64,
    /// Count of successfully paid orders.
    pub sales_count: usize,
    /// Count of orders in any state.
    pub orders_count: usize,
    /// Count of active catalog products.
    pub products_count: usize,
    pub customers_count: usize,
    /// Most recent successfully paid orders.
    pub recent_sales: Vec<Order>,
    /// Revenue per `YYYY-MM` month, oldest first.
    pub monthly_revenue: Vec<(String, i64)>,
}

/// Computes the dashboard aggregates.
///
/// Revenue only counts orders whose payment succeeded; pending and failed
/// payments never contribute.
pub fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardData>
where
    R: OrderReader + ProductReader + UserReader + ?Sized,
{
    ensure_admin(user)?;

    let (orders_count, _) = repo
        .list_orders(OrderListQuery::new().paginate(1, 1))
        .map_err(ServiceError::from)?;

    let (sales_count, paid_orders) = repo
        .list_orders(OrderListQuery::new().payment_status(PaymentStatus::Success))
        .map_err(ServiceError::from)?;

    let revenue_cents: i64 = paid_orders
        .iter()
        .map(|order| i64::from(order.total_cents))
        .sum();

    let mut monthly: BTreeMap<String, i64> = BTreeMap::new();
    for order in &paid_orders {
        let key = format!(
            "{:04}-{:02}",
            order.created_at.year(),
            order.created_at.month()
        );
        *monthly.entry(key).or_insert(0) += i64::from(order.total_cents);
    }

    // list_orders returns newest first.
    let recent_sales = paid_orders
        .into_iter()
        .take(RECENT_SALES_LIMIT)
        .collect();

    let (products_count, _) = repo
        .list_products(ProductListQuery::new().paginate(1, 1))
        .map_err(ServiceError::from)?;

    let customers_count = repo
        .count_users_by_role(CUSTOMER_ROLE)
        .map_err(ServiceError::from)?;

    Ok(DashboardData {
        revenue_cents,
        sales_count,
        orders_count,
        products_count,
        customers_count,
        recent_sales,
        monthly_revenue: monthly.into_iter().collect(),
    })
}

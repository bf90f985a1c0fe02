use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::order::{
        DeliveryStatus, NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery,
        PaymentStatus,
    },
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem,
    },
    repository::{DieselRepository, OrderReader, OrderWriter, RepositoryError, RepositoryResult},
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items_for_order(&mut conn, order.id)?;
        Ok(Some(order.into_domain(items)))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let OrderListQuery {
            user_id,
            payment_status,
            delivery_status,
            pagination,
        } = query;

        let mut count_query = orders::table.into_boxed::<diesel::sqlite::Sqlite>();
        let mut items_query = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(user) = user_id {
            count_query = count_query.filter(orders::user_id.eq(user));
            items_query = items_query.filter(orders::user_id.eq(user));
        }

        if let Some(status) = payment_status {
            count_query = count_query.filter(orders::payment_status.eq(status.as_str()));
            items_query = items_query.filter(orders::payment_status.eq(status.as_str()));
        }

        if let Some(status) = delivery_status {
            count_query = count_query.filter(orders::delivery_status.eq(status.as_str()));
            items_query = items_query.filter(orders::delivery_status.eq(status.as_str()));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        items_query = items_query.order(orders::created_at.desc());

        if let Some(pagination) = pagination {
            items_query = items_query
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let db_orders = items_query.load::<DbOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok((total, Vec::new()));
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();
        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let order_id = order.id;
                let items = items_by_order.remove(&order_id).unwrap_or_default();
                order.into_domain(items)
            })
            .collect();

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let db_new = DbNewOrder::from(new_order);

            let created = diesel::insert_into(orders::table)
                .values(&db_new)
                .get_result::<DbOrder>(conn)?;

            let order_id = created.id;

            let payload: Vec<DbNewOrderItem> = new_order
                .items
                .iter()
                .map(|item| DbNewOrderItem::from_domain(order_id, item))
                .collect();

            diesel::insert_into(order_items::table)
                .values(&payload)
                .execute(conn)?;

            // Conditional decrement: a concurrent checkout that got here
            // first leaves too little stock, the update matches no row and
            // the whole transaction rolls back.
            for item in &new_order.items {
                decrement_stock(conn, item.product_id, item.quantity)?;
            }

            let items = load_items_for_order(conn, order_id)?;
            Ok(created.into_domain(items))
        })
    }

    fn set_payment_status(
        &self,
        order_id: i32,
        status: PaymentStatus,
        reference: Option<&str>,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let updated = diesel::update(orders::table.filter(orders::id.eq(order_id)))
            .set((
                orders::payment_status.eq(status.as_str()),
                orders::payment_reference.eq(reference),
                orders::updated_at.eq(chrono::Local::now().naive_utc()),
            ))
            .get_result::<DbOrder>(&mut conn)?;

        let items = load_items_for_order(&mut conn, order_id)?;
        Ok(updated.into_domain(items))
    }

    fn set_delivery_status(
        &self,
        order_id: i32,
        status: DeliveryStatus,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let updated = diesel::update(orders::table.filter(orders::id.eq(order_id)))
            .set((
                orders::delivery_status.eq(status.as_str()),
                orders::updated_at.eq(chrono::Local::now().naive_utc()),
            ))
            .get_result::<DbOrder>(&mut conn)?;

        let items = load_items_for_order(&mut conn, order_id)?;
        Ok(updated.into_domain(items))
    }

    fn delete_order(&self, order_id: i32) -> RepositoryResult<()> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(orders::table.filter(orders::id.eq(order_id))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// `UPDATE products SET stock = stock - qty WHERE id = ? AND stock >= qty`.
/// Zero affected rows means the product vanished or has too little stock;
/// the caller's transaction must abort either way.
fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: i32,
    quantity: i32,
) -> Result<(), RepositoryError> {
    use crate::schema::products;

    let affected = diesel::update(
        products::table
            .filter(products::id.eq(product_id))
            .filter(products::stock.ge(quantity)),
    )
    .set((
        products::stock.eq(products::stock - quantity),
        products::updated_at.eq(chrono::Local::now().naive_utc()),
    ))
    .execute(conn)?;

    if affected == 0 {
        let current = products::table
            .filter(products::id.eq(product_id))
            .select((products::name, products::stock))
            .first::<(String, i32)>(conn)
            .optional()?;

        return Err(match current {
            Some((name, stock)) => RepositoryError::InsufficientStock {
                product: name,
                available: stock,
            },
            None => RepositoryError::NotFound,
        });
    }

    Ok(())
}

fn load_items_for_order(
    conn: &mut SqliteConnection,
    order_id: i32,
) -> RepositoryResult<Vec<DbOrderItem>> {
    use crate::schema::order_items;

    let items = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .order(order_items::id.asc())
        .load::<DbOrderItem>(conn)?;

    Ok(items)
}

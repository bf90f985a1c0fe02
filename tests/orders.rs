use std::thread;

use parfumerie::domain::order::{
    DeliveryStatus, NewOrder, NewOrderItem, OrderListQuery, PaymentMethod, PaymentStatus,
};
use parfumerie::domain::product::{NewProduct, UpdateProduct};
use parfumerie::domain::user::NewUser;
use parfumerie::repository::{
    DieselRepository, OrderReader, OrderWriter, ProductReader, ProductWriter, RepositoryError,
    UserWriter,
};

mod common;

fn seed_customer(repo: &DieselRepository, email: &str) -> i32 {
    repo.create_user(&NewUser::new("Customer", email, "hash", "customer"))
        .unwrap()
        .id
}

fn order_for(user_id: i32, items: Vec<NewOrderItem>, total_cents: i32) -> NewOrder {
    NewOrder {
        user_id,
        total_cents,
        currency: "GHS".to_string(),
        payment_method: PaymentMethod::Momo,
        recipient_name: "Ama Mensah".to_string(),
        phone: "0244000000".to_string(),
        address: "12 Oxford Street, Accra".to_string(),
        items,
    }
}

#[test]
fn test_order_creation_decrements_stock() {
    let test_db = common::TestDb::new("test_order_creation_decrements_stock.db");
    let repo = DieselRepository::new(test_db.pool());
    let user_id = seed_customer(&repo, "buyer@example.com");

    let product = repo
        .create_product(&NewProduct::new("Libre", "Yves Saint Laurent", 52_000).with_stock(10))
        .unwrap();

    let order = repo
        .create_order(&order_for(
            user_id,
            vec![NewOrderItem {
                product_id: product.id,
                name: product.name.clone(),
                quantity: 3,
                price_cents: product.price_cents,
            }],
            156_000,
        ))
        .unwrap();

    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(order.delivery_status, DeliveryStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items_subtotal_cents(), 156_000);

    let remaining = repo.get_product_by_id(product.id).unwrap().unwrap();
    assert_eq!(remaining.stock, 7);
}

#[test]
fn test_insufficient_stock_rolls_back_every_line() {
    let test_db = common::TestDb::new("test_insufficient_stock_rolls_back.db");
    let repo = DieselRepository::new(test_db.pool());
    let user_id = seed_customer(&repo, "buyer@example.com");

    let plenty = repo
        .create_product(&NewProduct::new("CK One", "Calvin Klein", 18_000).with_stock(10))
        .unwrap();
    let scarce = repo
        .create_product(&NewProduct::new("Oud Wood", "Tom Ford", 120_000).with_stock(1))
        .unwrap();

    let err = repo
        .create_order(&order_for(
            user_id,
            vec![
                NewOrderItem {
                    product_id: plenty.id,
                    name: plenty.name.clone(),
                    quantity: 2,
                    price_cents: plenty.price_cents,
                },
                NewOrderItem {
                    product_id: scarce.id,
                    name: scarce.name.clone(),
                    quantity: 2,
                    price_cents: scarce.price_cents,
                },
            ],
            276_000,
        ))
        .expect_err("expected the scarce line to abort the order");

    match err {
        RepositoryError::InsufficientStock { product, available } => {
            assert_eq!(product, "Oud Wood");
            assert_eq!(available, 1);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Nothing was committed: no order rows and no stock movement at all.
    let (total, _) = repo.list_orders(OrderListQuery::new()).unwrap();
    assert_eq!(total, 0);
    assert_eq!(repo.get_product_by_id(plenty.id).unwrap().unwrap().stock, 10);
    assert_eq!(repo.get_product_by_id(scarce.id).unwrap().unwrap().stock, 1);
}

#[test]
fn test_concurrent_checkouts_never_oversell() {
    let test_db = common::TestDb::new("test_concurrent_checkouts_never_oversell.db");
    let repo = DieselRepository::new(test_db.pool());
    let user_id = seed_customer(&repo, "buyer@example.com");

    let product = repo
        .create_product(&NewProduct::new("Last Bottle", "Giorgio Armani", 65_000).with_stock(1))
        .unwrap();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let repo = repo.clone();
            let new_order = order_for(
                user_id,
                vec![NewOrderItem {
                    product_id: product.id,
                    name: product.name.clone(),
                    quantity: 1,
                    price_cents: product.price_cents,
                }],
                65_000,
            );
            thread::spawn(move || repo.create_order(&new_order))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let succeeded = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(succeeded, 1);

    let remaining = repo.get_product_by_id(product.id).unwrap().unwrap();
    assert_eq!(remaining.stock, 0);

    let (total, _) = repo.list_orders(OrderListQuery::new()).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_order_items_keep_purchase_price() {
    let test_db = common::TestDb::new("test_order_items_keep_purchase_price.db");
    let repo = DieselRepository::new(test_db.pool());
    let user_id = seed_customer(&repo, "buyer@example.com");

    let product = repo
        .create_product(&NewProduct::new("Libre", "Yves Saint Laurent", 52_000).with_stock(5))
        .unwrap();

    let order = repo
        .create_order(&order_for(
            user_id,
            vec![NewOrderItem {
                product_id: product.id,
                name: product.name.clone(),
                quantity: 1,
                price_cents: product.price_cents,
            }],
            52_000,
        ))
        .unwrap();

    // A later price change must not touch the frozen line.
    repo.update_product(product.id, &UpdateProduct::new().price_cents(60_000))
        .unwrap();

    let reloaded = repo.get_order_by_id(order.id).unwrap().unwrap();
    assert_eq!(reloaded.items[0].price_cents, 52_000);

    // Deleting the product keeps the line with its snapshot name.
    repo.delete_product(product.id).unwrap();
    let reloaded = repo.get_order_by_id(order.id).unwrap().unwrap();
    assert_eq!(reloaded.items[0].product_id, None);
    assert_eq!(reloaded.items[0].name, "Libre");
}

#[test]
fn test_order_status_setters_and_filters() {
    let test_db = common::TestDb::new("test_order_status_setters_and_filters.db");
    let repo = DieselRepository::new(test_db.pool());
    let buyer = seed_customer(&repo, "buyer@example.com");
    let other = seed_customer(&repo, "other@example.com");

    let product = repo
        .create_product(&NewProduct::new("CK One", "Calvin Klein", 18_000).with_stock(10))
        .unwrap();
    let line = |quantity| {
        vec![NewOrderItem {
            product_id: product.id,
            name: product.name.clone(),
            quantity,
            price_cents: product.price_cents,
        }]
    };

    let paid = repo
        .create_order(&order_for(buyer, line(1), 18_000))
        .unwrap();
    repo.create_order(&order_for(other, line(1), 18_000))
        .unwrap();

    let paid = repo
        .set_payment_status(paid.id, PaymentStatus::Success, Some("ps_ref_123"))
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Success);
    assert_eq!(paid.payment_reference.as_deref(), Some("ps_ref_123"));

    let shipped = repo
        .set_delivery_status(paid.id, DeliveryStatus::Processing)
        .unwrap();
    assert_eq!(shipped.delivery_status, DeliveryStatus::Processing);

    let (total, mine) = repo
        .list_orders(OrderListQuery::new().user_id(buyer))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(mine[0].id, paid.id);

    let (total, _) = repo
        .list_orders(OrderListQuery::new().payment_status(PaymentStatus::Success))
        .unwrap();
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_orders(OrderListQuery::new().delivery_status(DeliveryStatus::Pending))
        .unwrap();
    assert_eq!(total, 1);

    repo.delete_order(paid.id).unwrap();
    assert!(repo.get_order_by_id(paid.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_order(paid.id),
        Err(RepositoryError::NotFound)
    ));
}

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{NewOrder, NewOrderItem, Order, PaymentStatus};
use crate::domain::settings::DefaultSettings;
use crate::forms::checkout::CheckoutData;
use crate::payment::PaymentGateway;
use crate::repository::{OrderReader, OrderWriter, ProductReader, SettingsReader};
use crate::services::{ServiceError, ServiceResult};

/// Validates the submitted cart against the live catalog and creates the
/// order in a single unit of work.
///
/// Every number the client sent is re-derived server-side: unit prices must
/// match the catalog exactly and the displayed total must equal the
/// recomputed subtotal plus the configured shipping fee. Stock is checked
/// here for an early error message, but the authoritative check happens
/// inside the order transaction.
pub fn place_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    data: CheckoutData,
) -> ServiceResult<Order>
where
    R: ProductReader + SettingsReader + OrderWriter + ?Sized,
{
    if user.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    if data.cart.is_empty() {
        return Err(ServiceError::InvalidRequest("your cart is empty".to_string()));
    }

    let mut items = Vec::with_capacity(data.cart.items.len());
    let mut subtotal_cents: i64 = 0;

    for line in &data.cart.items {
        if line.quantity < 1 {
            return Err(ServiceError::InvalidRequest(format!(
                "invalid quantity for {}",
                line.name
            )));
        }

        let product = repo
            .get_product_by_id(line.product_id)
            .map_err(ServiceError::from)?
            .filter(|product| product.is_active)
            .ok_or_else(|| {
                ServiceError::InvalidRequest(format!("{} is no longer available", line.name))
            })?;

        if product.stock < line.quantity {
            return Err(ServiceError::InsufficientStock {
                product: product.name,
                available: product.stock,
            });
        }

        if product.price_cents != line.unit_price_cents {
            return Err(ServiceError::InvalidRequest(format!(
                "the price of {} has changed, please review your cart",
                product.name
            )));
        }

        subtotal_cents += i64::from(product.price_cents) * i64::from(line.quantity);
        items.push(NewOrderItem {
            product_id: product.id,
            name: product.name,
            quantity: line.quantity,
            price_cents: product.price_cents,
        });
    }

    let defaults = DefaultSettings::default();
    let settings = repo.get_settings().map_err(ServiceError::from)?;
    let (currency, shipping_fee_cents) = match settings {
        Some(settings) => (settings.currency, settings.shipping_fee_cents),
        None => (defaults.currency, defaults.shipping_fee_cents),
    };

    let expected_total = subtotal_cents + i64::from(shipping_fee_cents);
    if expected_total != data.total_cents {
        return Err(ServiceError::InvalidRequest(
            "the order total is out of date, please review your cart".to_string(),
        ));
    }

    let total_cents = i32::try_from(expected_total).map_err(|_| {
        ServiceError::InvalidRequest("the order total is too large".to_string())
    })?;

    let new_order = NewOrder {
        user_id: user.id,
        total_cents,
        currency,
        payment_method: data.payment_method,
        recipient_name: data.recipient_name,
        phone: data.phone,
        address: data.address,
        items,
    };

    let order = repo.create_order(&new_order).map_err(ServiceError::from)?;
    log::info!("order {} placed by user {}", order.id, user.id);

    Ok(order)
}

/// Starts a gateway transaction for a freshly placed order and stores the
/// returned reference. The order row must already be committed when this
/// runs. Returns the URL the shopper is redirected to.
pub async fn start_payment<R>(
    repo: &R,
    gateway: &dyn PaymentGateway,
    user: &AuthenticatedUser,
    order_id: i32,
    callback_url: &str,
) -> ServiceResult<String>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if order.user_id != user.id {
        return Err(ServiceError::Forbidden);
    }

    if order.payment_status.is_terminal() {
        return Err(ServiceError::InvalidRequest(
            "payment for this order is already settled".to_string(),
        ));
    }

    let initialized = gateway
        .initialize(&user.email, i64::from(order.total_cents), callback_url)
        .await?;

    repo.set_payment_status(order.id, PaymentStatus::Pending, Some(&initialized.reference))
        .map_err(ServiceError::from)?;

    Ok(initialized.authorization_url)
}

/// Verifies a gateway reference and settles the order's payment status.
///
/// Re-running the confirmation for an order that already reached a terminal
/// payment state is a no-op returning the stored order.
pub async fn confirm_payment<R>(
    repo: &R,
    gateway: &dyn PaymentGateway,
    user: &AuthenticatedUser,
    order_id: i32,
    reference: &str,
) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if order.user_id != user.id && !user.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    if order.payment_status.is_terminal() {
        return Ok(order);
    }

    let verification = gateway.verify(reference).await?;

    let status = if verification.succeeded {
        PaymentStatus::Success
    } else {
        log::warn!(
            "payment for order {} failed: {}",
            order.id,
            verification.message.as_deref().unwrap_or("no gateway message")
        );
        PaymentStatus::Failed
    };

    repo.set_payment_status(order.id, status, Some(reference))
        .map_err(ServiceError::from)
}

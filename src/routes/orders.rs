use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::DeliveryStatus;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::orders::OrdersQuery;
use crate::services::{ServiceError, orders};

#[get("/orders")]
pub async fn show_my_orders(
    params: web::Query<OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match orders::load_my_orders_page(repo.get_ref(), &user, params.0) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "orders");
            context.insert("orders", &data.orders);
            render_template(&tera, "orders/index.html", &context)
        }
        Err(err) => {
            log::error!("failed to list orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/orders/{id}")]
pub async fn show_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match orders::load_order_page(repo.get_ref(), &user, path.into_inner()) {
        Ok(order) => {
            let mut context = base_context(&flash_messages, Some(&user), "orders");
            context.insert("order", &order);
            render_template(&tera, "orders/detail.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("failed to load an order: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/orders")]
pub async fn show_admin_orders(
    params: web::Query<OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match orders::load_admin_orders_page(repo.get_ref(), &user, params.0) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin_orders");
            context.insert("orders", &data.orders);
            context.insert(
                "payment_status",
                &data.payment_status.map(|status| status.as_str()),
            );
            context.insert(
                "delivery_status",
                &data.delivery_status.map(|status| status.as_str()),
            );
            render_template(&tera, "admin/orders.html", &context)
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("failed to list orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeliveryStatusForm {
    pub status: String,
}

#[post("/admin/orders/{id}/delivery")]
pub async fn update_delivery_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeliveryStatusForm>,
) -> impl Responder {
    let next = match DeliveryStatus::parse(&form.status) {
        Some(status) => status,
        None => {
            FlashMessage::error(format!("Unknown delivery status `{}`.", form.status)).send();
            return redirect("/admin/orders");
        }
    };

    match orders::update_delivery_status(repo.get_ref(), &user, path.into_inner(), next) {
        Ok(order) => {
            FlashMessage::success(format!(
                "Order #{} moved to {}.",
                order.id,
                order.delivery_status.as_str()
            ))
            .send();
            redirect("/admin/orders")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Order not found.").send();
            redirect("/admin/orders")
        }
        Err(ServiceError::InvalidRequest(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/orders")
        }
        Err(err) => {
            log::error!("failed to update delivery status: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/orders/{id}/delete")]
pub async fn delete_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::delete_order(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Order deleted.").send();
            redirect("/admin/orders")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Order not found.").send();
            redirect("/admin/orders")
        }
        Err(err) => {
            log::error!("failed to delete an order: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

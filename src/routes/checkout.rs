use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::PaymentMethod;
use crate::forms::checkout::CheckoutForm;
use crate::payment::PaystackGateway;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::shop::load_settings;
use crate::services::{ServiceError, checkout};

/// Public host used to build the payment callback URL.
#[derive(Clone)]
pub struct ServerConfig {
    pub base_url: String,
}

#[get("/checkout")]
pub async fn show_checkout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_settings(repo.get_ref()) {
        Ok(settings) => {
            let mut context = base_context(&flash_messages, Some(&user), "checkout");
            context.insert("settings", &settings);
            render_template(&tera, "checkout/index.html", &context)
        }
        Err(err) => {
            log::error!("failed to load the checkout page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/checkout")]
pub async fn place_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    gateway: web::Data<PaystackGateway>,
    config: web::Data<ServerConfig>,
    web::Form(form): web::Form<CheckoutForm>,
) -> impl Responder {
    let data = match form.into_checkout_data() {
        Ok(data) => data,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/checkout");
        }
    };
    let payment_method = data.payment_method;

    let order = match checkout::place_order(repo.get_ref(), &user, data) {
        Ok(order) => order,
        Err(ServiceError::Forbidden) => {
            FlashMessage::error("Administrators cannot place orders.").send();
            return redirect("/");
        }
        Err(
            ServiceError::InvalidRequest(message)
            | ServiceError::Form(message)
            | ServiceError::Gateway(message),
        ) => {
            FlashMessage::error(message).send();
            return redirect("/checkout");
        }
        Err(ServiceError::InsufficientStock { product, available }) => {
            FlashMessage::error(format!(
                "Not enough stock for {product}, only {available} left."
            ))
            .send();
            return redirect("/checkout");
        }
        Err(err) => {
            log::error!("failed to place an order: {err}");
            FlashMessage::error("Something went wrong, please try again.").send();
            return redirect("/checkout");
        }
    };

    // The order exists regardless of what the gateway does next.
    match payment_method {
        PaymentMethod::Momo | PaymentMethod::Card => {
            let callback_url = format!("{}/checkout/callback/{}", config.base_url, order.id);
            match checkout::start_payment(
                repo.get_ref(),
                gateway.get_ref(),
                &user,
                order.id,
                &callback_url,
            )
            .await
            {
                Ok(authorization_url) => redirect(&authorization_url),
                Err(err) => {
                    log::error!("failed to start payment for order {}: {err}", order.id);
                    FlashMessage::warning(
                        "Your order was placed but the payment could not be started. \
                         You can retry from the order page.",
                    )
                    .send();
                    redirect(&format!("/orders/{}", order.id))
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub reference: Option<String>,
    /// Alternative parameter name used by the gateway redirect.
    pub trxref: Option<String>,
}

#[get("/checkout/callback/{order_id}")]
pub async fn payment_callback(
    path: web::Path<i32>,
    params: web::Query<CallbackQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    gateway: web::Data<PaystackGateway>,
) -> impl Responder {
    let order_id = path.into_inner();
    let params = params.into_inner();

    let reference = match params.reference.or(params.trxref) {
        Some(reference) => reference,
        None => {
            FlashMessage::error("The payment reference is missing.").send();
            return redirect(&format!("/orders/{order_id}"));
        }
    };

    match checkout::confirm_payment(repo.get_ref(), gateway.get_ref(), &user, order_id, &reference)
        .await
    {
        Ok(order) if order.payment_status.is_terminal() => {
            match order.payment_status {
                crate::domain::order::PaymentStatus::Success => {
                    FlashMessage::success("Payment received, thank you!").send()
                }
                _ => FlashMessage::error("The payment did not go through.").send(),
            }
            redirect(&format!("/orders/{order_id}"))
        }
        Ok(_) => redirect(&format!("/orders/{order_id}")),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::Gateway(message)) => {
            log::error!("payment verification failed for order {order_id}: {message}");
            FlashMessage::warning(
                "We could not verify the payment yet. It will be retried shortly.",
            )
            .send();
            redirect(&format!("/orders/{order_id}"))
        }
        Err(err) => {
            log::error!("payment confirmation failed for order {order_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

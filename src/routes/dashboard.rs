use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::{ServiceError, dashboard};

#[get("/admin")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match dashboard::load_dashboard(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin_dashboard");
            context.insert("revenue_cents", &data.revenue_cents);
            context.insert("sales_count", &data.sales_count);
            context.insert("orders_count", &data.orders_count);
            context.insert("products_count", &data.products_count);
            context.insert("customers_count", &data.customers_count);
            context.insert("recent_sales", &data.recent_sales);
            context.insert("monthly_revenue", &data.monthly_revenue);
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("failed to load the dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

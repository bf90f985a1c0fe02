use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::shop::ShopQuery;
use crate::services::{ServiceError, shop};

#[get("/")]
pub async fn show_home(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match shop::load_home_page(repo.get_ref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "home");
            context.insert("banners", &data.banners);
            context.insert("featured", &data.featured);
            context.insert("categories", &data.categories);
            context.insert("settings", &data.settings);
            render_template(&tera, "shop/home.html", &context)
        }
        Err(err) => {
            log::error!("failed to load the home page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/shop")]
pub async fn show_shop(
    params: web::Query<ShopQuery>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match shop::load_shop_page(repo.get_ref(), params.0) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "shop");
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            context.insert("brands", &data.brands);
            context.insert("fragrance_types", &data.fragrance_types);
            context.insert("search", &data.search);
            context.insert("settings", &data.settings);
            render_template(&tera, "shop/index.html", &context)
        }
        Err(err) => {
            log::error!("failed to load the catalog: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{id}")]
pub async fn show_product(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match shop::load_product_page(repo.get_ref(), path.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "shop");
            context.insert("product", &data.product);
            context.insert("related", &data.related);
            context.insert("settings", &data.settings);
            render_template(&tera, "shop/product.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("failed to load a product page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

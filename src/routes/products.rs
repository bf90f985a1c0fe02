use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::products::AdminProductsQuery;
use crate::services::{ServiceError, products};

#[get("/admin/products")]
pub async fn show_products(
    params: web::Query<AdminProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_products_page(repo.get_ref(), &user, params.0) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin_products");
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            context.insert("search", &data.search);
            render_template(&tera, "admin/products.html", &context)
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/products")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), &user, form) {
        Ok(product) => {
            FlashMessage::success(format!("{} added to the catalog.", product.name)).send();
            redirect("/admin/products")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("failed to add a product: {err}");
            FlashMessage::error("Could not add the product.").send();
            redirect("/admin/products")
        }
    }
}

#[post("/admin/products/{id}")]
pub async fn edit_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditProductForm>,
) -> impl Responder {
    match products::update_product(repo.get_ref(), &user, path.into_inner(), form) {
        Ok(product) => {
            FlashMessage::success(format!("{} updated.", product.name)).send();
            redirect("/admin/products")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/admin/products")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("failed to update a product: {err}");
            FlashMessage::error("Could not update the product.").send();
            redirect("/admin/products")
        }
    }
}

#[post("/admin/products/{id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::delete_product(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
            redirect("/admin/products")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("failed to delete a product: {err}");
            FlashMessage::error("Could not delete the product.").send();
            redirect("/admin/products")
        }
    }
}

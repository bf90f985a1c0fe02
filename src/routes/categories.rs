use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, categories};

#[get("/admin/categories")]
pub async fn show_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match categories::load_categories_page(repo.get_ref(), &user) {
        Ok(list) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin_categories");
            context.insert("categories", &list);
            render_template(&tera, "admin/categories.html", &context)
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/categories")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    match categories::create_category(repo.get_ref(), &user, form) {
        Ok(category) => {
            FlashMessage::success(format!("Category {} created.", category.name)).send();
            redirect("/admin/categories")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/categories")
        }
        Err(err) => {
            log::error!("failed to add a category: {err}");
            FlashMessage::error("Could not create the category.").send();
            redirect("/admin/categories")
        }
    }
}

#[post("/admin/categories/{id}")]
pub async fn edit_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditCategoryForm>,
) -> impl Responder {
    match categories::update_category(repo.get_ref(), &user, path.into_inner(), form) {
        Ok(category) => {
            FlashMessage::success(format!("Category {} updated.", category.name)).send();
            redirect("/admin/categories")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect("/admin/categories")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/categories")
        }
        Err(err) => {
            log::error!("failed to update a category: {err}");
            FlashMessage::error("Could not update the category.").send();
            redirect("/admin/categories")
        }
    }
}

#[post("/admin/categories/{id}/delete")]
pub async fn delete_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::delete_category(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Category deleted.").send();
            redirect("/admin/categories")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect("/admin/categories")
        }
        Err(err) => {
            log::error!("failed to delete a category: {err}");
            FlashMessage::error("Could not delete the category.").send();
            redirect("/admin/categories")
        }
    }
}

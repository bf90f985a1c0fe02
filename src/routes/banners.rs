use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::banners::{AddBannerForm, EditBannerForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, banners};

#[get("/admin/banners")]
pub async fn show_banners(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match banners::load_banners_page(repo.get_ref(), &user) {
        Ok(list) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin_banners");
            context.insert("banners", &list);
            render_template(&tera, "admin/banners.html", &context)
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("failed to list banners: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/banners")]
pub async fn add_banner(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddBannerForm>,
) -> impl Responder {
    match banners::create_banner(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Banner created.").send();
            redirect("/admin/banners")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/banners")
        }
        Err(err) => {
            log::error!("failed to add a banner: {err}");
            FlashMessage::error("Could not create the banner.").send();
            redirect("/admin/banners")
        }
    }
}

#[post("/admin/banners/{id}")]
pub async fn edit_banner(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditBannerForm>,
) -> impl Responder {
    match banners::update_banner(repo.get_ref(), &user, path.into_inner(), form) {
        Ok(_) => {
            FlashMessage::success("Banner updated.").send();
            redirect("/admin/banners")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Banner not found.").send();
            redirect("/admin/banners")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/banners")
        }
        Err(err) => {
            log::error!("failed to update a banner: {err}");
            FlashMessage::error("Could not update the banner.").send();
            redirect("/admin/banners")
        }
    }
}

#[post("/admin/banners/{id}/delete")]
pub async fn delete_banner(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match banners::delete_banner(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Banner deleted.").send();
            redirect("/admin/banners")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Banner not found.").send();
            redirect("/admin/banners")
        }
        Err(err) => {
            log::error!("failed to delete a banner: {err}");
            FlashMessage::error("Could not delete the banner.").send();
            redirect("/admin/banners")
        }
    }
}

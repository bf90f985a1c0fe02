use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::settings::EditSettingsForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, settings};

#[get("/admin/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match settings::load_settings_page(repo.get_ref(), &user) {
        Ok(store_settings) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin_settings");
            context.insert("settings", &store_settings);
            render_template(&tera, "admin/settings.html", &context)
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("failed to load settings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/settings")]
pub async fn update_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditSettingsForm>,
) -> impl Responder {
    match settings::update_settings(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Settings saved.").send();
            redirect("/admin/settings")
        }
        Err(ServiceError::Forbidden) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/settings")
        }
        Err(err) => {
            log::error!("failed to update settings: {err}");
            FlashMessage::error("Could not save the settings.").send();
            redirect("/admin/settings")
        }
    }
}

use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, auth};

#[get("/auth/login")]
pub async fn show_login(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }
    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/auth/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match auth::login(repo.get_ref(), form) {
        Ok(session_user) => start_session(&req, &session_user),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Wrong email or password.").send();
            redirect("/auth/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/auth/login")
        }
        Err(err) => {
            log::error!("login failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/auth/register")]
pub async fn show_register(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }
    let context = base_context(&flash_messages, None, "register");
    render_template(&tera, "auth/register.html", &context)
}

#[post("/auth/register")]
pub async fn register(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    match auth::register(repo.get_ref(), form) {
        Ok(session_user) => start_session(&req, &session_user),
        Err(ServiceError::Form(message) | ServiceError::InvalidRequest(message)) => {
            FlashMessage::error(message).send();
            redirect("/auth/register")
        }
        Err(err) => {
            log::error!("registration failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/auth/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    redirect("/")
}

fn start_session(req: &HttpRequest, session_user: &AuthenticatedUser) -> HttpResponse {
    let payload = match session_user.to_session_string() {
        Ok(payload) => payload,
        Err(err) => {
            log::error!("failed to serialize the session payload: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = Identity::login(&req.extensions(), payload) {
        log::error!("failed to start a session: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    redirect("/")
}

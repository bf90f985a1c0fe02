use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;

pub mod auth;
pub mod banners;
pub mod categories;
pub mod checkout;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod settings;
pub mod shop;

/// Builds the context shared by every rendered page: flash messages, the
/// current user (when logged in) and the active navigation entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    active_page: &str,
) -> Context {
    let alerts: Vec<(String, String)> = flash_messages
        .iter()
        .map(|message| {
            (
                format!("{:?}", message.level()).to_lowercase(),
                message.content().to_string(),
            )
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("active_page", active_page);
    context
}

/// 303 redirect to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders a template or logs and returns a 500.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("failed to render {name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Error handler that turns 401 responses into a redirect to the login
/// page, so guarded pages never show a bare error to a signed-out visitor.
pub fn redirect_unauthorized(
    res: ServiceResponse<BoxBody>,
) -> actix_web::Result<ErrorHandlerResponse<BoxBody>> {
    let (req, _) = res.into_parts();
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/auth/login"))
        .finish();
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

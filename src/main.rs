use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::middleware::ErrorHandlers;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use parfumerie::db::establish_connection_pool;
use parfumerie::payment::PaystackGateway;
use parfumerie::repository::DieselRepository;
use parfumerie::routes::auth::{login, logout, register, show_login, show_register};
use parfumerie::routes::banners::{add_banner, delete_banner, edit_banner, show_banners};
use parfumerie::routes::categories::{
    add_category, delete_category, edit_category, show_categories,
};
use parfumerie::routes::checkout::{ServerConfig, payment_callback, place_order, show_checkout};
use parfumerie::routes::dashboard::show_dashboard;
use parfumerie::routes::orders::{
    delete_order, show_admin_orders, show_my_orders, show_order, update_delivery_status,
};
use parfumerie::routes::products::{add_product, delete_product, edit_product, show_products};
use parfumerie::routes::redirect_unauthorized;
use parfumerie::routes::settings::{show_settings, update_settings};
use parfumerie::routes::shop::{show_home, show_product, show_shop};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("shop.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let paystack_secret = match env::var("PAYSTACK_SECRET_KEY") {
        Ok(secret) => secret,
        Err(_) => {
            log::error!("PAYSTACK_SECRET_KEY environment variable not set");
            std::process::exit(1);
        }
    };

    let gateway = match PaystackGateway::new(paystack_secret) {
        Ok(gateway) => gateway,
        Err(e) => {
            log::error!("Failed to build the payment gateway client: {e}");
            std::process::exit(1);
        }
    };

    let base_url = env::var("BASE_URL").unwrap_or(format!("http://{address}:{port}"));
    let server_config = ServerConfig { base_url };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_login)
            .service(login)
            .service(show_register)
            .service(register)
            .service(logout)
            .service(
                web::scope("")
                    .wrap(
                        ErrorHandlers::new()
                            .handler(StatusCode::UNAUTHORIZED, redirect_unauthorized),
                    )
                    .service(show_home)
                    .service(show_shop)
                    .service(show_product)
                    .service(show_checkout)
                    .service(place_order)
                    .service(payment_callback)
                    .service(show_my_orders)
                    .service(show_order)
                    .service(show_dashboard)
                    .service(show_products)
                    .service(add_product)
                    .service(edit_product)
                    .service(delete_product)
                    .service(show_categories)
                    .service(add_category)
                    .service(edit_category)
                    .service(delete_category)
                    .service(show_banners)
                    .service(add_banner)
                    .service(edit_banner)
                    .service(delete_banner)
                    .service(show_admin_orders)
                    .service(update_delivery_status)
                    .service(delete_order)
                    .service(show_settings)
                    .service(update_settings),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}

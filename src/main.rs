#[macro_use]
extern crate diesel;
extern crate dotenv;

pub mod app;
pub mod database;
pub mod schema;

mod auth;
mod forms;
mod guard;
mod routes;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

use app::AppState;
use routes::{auth::*, blog::*, comment::*};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_state = AppState::new(None);
    let session_key = app::session_key();
    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| String::from("127.0.0.1:8080"));

    log::info!("Server running on {}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Logger::default())
            .wrap(app::session_middleware(session_key.clone()))
            //Auth routes
            .service(register)
            .service(login)
            .service(forgot)
            .service(logout)
            //Blog routes
            .service(index)
            .service(create)
            .service(update_form)
            .service(update)
            .service(detail)
            .service(delete_blog)
            //Comment routes
            .service(create_comment)
            .service(delete_comment)
    })
    .bind(bind_addr)?
    .run()
    .await
}

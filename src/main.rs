use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use taskdeck::auth::TokenService;
use taskdeck::config::Config;
use taskdeck::models::{TaskStore, UserStore};
use taskdeck::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db::init_schema(&pool)
        .await
        .expect("Failed to create database schema");

    let user_store = UserStore::new(pool.clone());
    let task_store = TaskStore::new(pool);
    let tokens = TokenService::new(&config.jwt_secret);

    log::info!("Server is running at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(user_store.clone()))
            .app_data(web::Data::new(task_store.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::api(tokens.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

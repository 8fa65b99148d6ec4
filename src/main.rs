use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use log::info;

use employee_reviews::{db, handlers, AppConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    // Initialize the database pool
    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .expect("Failed to connect to the database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to apply database migrations");

    info!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(|cfg| handlers::configure(cfg, &pool))
    })
    .bind(config.bind_address())?
    .run()
    .await
}

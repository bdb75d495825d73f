use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use household_expenses::{
    config::Config,
    db::Connection,
    errors::Result,
    routes,
    service::ExpenseService,
    store::MongoExpenseStore,
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Before the subscriber so RUST_LOG may come from .env
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let connection = Connection::open(&config).await?;

    let store = Arc::new(MongoExpenseStore::new(connection.database()));
    let service = web::Data::new(ExpenseService::new(store));

    info!("Listening on {}:{}", config.host, config.port);
    let origins = config.cors_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&origins))
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    connection.close().await;
    Ok(())
}

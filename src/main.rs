use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use roster_backend::config::AppConfig;
use roster_backend::db;
use roster_backend::handlers::{self, AppState};
use roster_backend::roster::RosterService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(|err| {
        log::error!("Invalid configuration: {}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let store = db::open_store(&config);
    info!("Roster document: {}", store.path().display());

    let state = web::Data::new(AppState::new(RosterService::new(Arc::new(store))));

    info!("Starting server at {}", config.bind_address);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}

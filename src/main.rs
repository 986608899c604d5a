mod api_routes;
mod api_state;
mod models;
mod repo;
mod service;
mod utils;
mod web_routes;

#[cfg(test)]
mod test_support;

use crate::api_state::AppState;
use crate::models::config::Settings;
use crate::repo::sqlite::SqliteStore;
use crate::service::registry::Registry;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;

#[macro_use]
extern crate rocket;

use rocket::config::LogLevel;
use rocket::fs::{relative, FileServer};
use rocket_dyn_templates::Template;

fn build_rocket(settings: &Settings, state: AppState) -> rocket::Rocket<rocket::Build> {
    let log_level = if settings.debug {
        LogLevel::Debug
    } else {
        LogLevel::Normal
    };

    let figment = rocket::Config::figment()
        .merge(("address", settings.host))
        .merge(("port", settings.port))
        .merge(("log_level", log_level))
        .merge(("template_dir", "templates"));

    rocket::custom(figment)
        .manage(state)
        .attach(Template::fairing())
        .mount(
            "/",
            routes![
                web_routes::index,
                web_routes::exceptions,
                web_routes::exceptions_post,
                api_routes::update_get,
                api_routes::update_post,
                api_routes::query_get,
                api_routes::query_post,
                api_routes::health_check,
            ],
        )
        .mount("/", FileServer::from(relative!("static")))
}

fn open_registry(settings: &Settings) -> Result<Registry> {
    let store = SqliteStore::open(&settings.database_file)
        .context("Failed to initialize database connection pool")?;
    store
        .setup_database()
        .context("Failed to set up database schema")?;
    info!("Database ready: {}", settings.database_file);
    Ok(Registry::new(Arc::new(store)))
}

#[rocket::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    env_logger::Builder::from_default_env()
        .filter_level(settings.log_filter())
        .format_timestamp_secs()
        .init();

    info!("Backup status service starting...");
    settings.validate().context("Invalid settings")?;

    let registry = open_registry(&settings)?;
    let state = AppState::new(registry);

    info!("Listening on {}:{}", settings.host, settings.port);
    build_rocket(&settings, state).launch().await?;
    Ok(())
}

use crate::api_state::AppState;
use crate::models::config::Settings;
use crate::repo::sqlite::SqliteStore;
use crate::service::registry::Registry;
use rocket::local::blocking::Client;
use std::sync::Arc;
use tempfile::TempDir;

pub fn test_settings(database_file: &str) -> Settings {
    Settings {
        host: "127.0.0.1".parse().unwrap(),
        port: 8000,
        debug: false,
        use_reloader: false,
        database_file: database_file.to_string(),
        log_level: "info".to_string(),
    }
}

/// A client over a fresh on-disk database; keep the TempDir alive as long
/// as the client.
pub fn test_client() -> (TempDir, Client) {
    let dir = TempDir::new().unwrap();
    let db_file = dir.path().join("status.db");
    let settings = test_settings(db_file.to_str().unwrap());

    let registry = crate::open_registry(&settings).unwrap();
    let rocket = crate::build_rocket(&settings, AppState::new(registry));
    let client = Client::tracked(rocket).expect("valid rocket instance");
    (dir, client)
}

#[test]
fn test_open_registry_on_fresh_database() {
    let dir = TempDir::new().unwrap();
    let db_file = dir.path().join("fresh.db");

    let registry = crate::open_registry(&test_settings(db_file.to_str().unwrap())).unwrap();
    assert!(registry.list_all().unwrap().bad.is_empty());
    assert!(db_file.exists());
}

#[test]
fn test_registry_shares_store_across_clones() {
    let store = SqliteStore::open(":memory:").unwrap();
    store.setup_database().unwrap();
    let registry = Registry::new(Arc::new(store));
    let state = AppState::new(registry.clone());

    registry
        .upsert("hostA", "/data", crate::models::flag::Flag::SET, Default::default())
        .unwrap();
    assert!(state.registry().query("hostA", "/data").unwrap().is_set());
}

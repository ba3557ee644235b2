use std::sync::Arc;
use std::time::Duration;

use backoffice::paths;
use backoffice::query::{Location, MemoryLocation};
use backoffice::screen::ListScreen;
use backoffice::screens::currencies;
use backoffice::settings::{SettingsPreferenceStore, SettingsProvider, SqliteBackend};
use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use tablekit::config::TableConfig;
use tablekit::table::TableEvent;

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    match paths::create_log_file(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create {}: {}", path.display(), e),
    }
}

async fn open_settings() -> SettingsProvider {
    if let Some(path) = paths::settings_db() {
        match SqliteBackend::open(&path).await {
            Ok(backend) => return SettingsProvider::new(backend),
            Err(e) => warn!("Settings at {} unavailable: {}", path.display(), e),
        }
    }
    let backend = SqliteBackend::in_memory()
        .await
        .expect("Failed to open in-memory settings");
    SettingsProvider::new(backend)
}

#[tokio::main]
async fn main() {
    init_logging();

    let store = Arc::new(SettingsPreferenceStore::new(open_settings().await));
    match store.table_ids().await {
        Ok(ids) => info!("Stored table preferences: {:?}", ids),
        Err(e) => warn!("Could not list stored preferences: {}", e),
    }
    let source = Arc::new(currencies::source(currencies::sample(chrono::Utc::now())));
    let location = Arc::new(MemoryLocation::new("?page=1"));
    let config = TableConfig::new();
    let debounce = config.search_debounce();

    let mut screen = ListScreen::mount(
        currencies::definition(),
        source,
        store,
        location.clone(),
        config,
    )
    .await;
    println!("{}", screen.render().to_plain_text());

    screen.table_mut().click("currencies-sort-name");
    screen
        .table_mut()
        .dispatch(TableEvent::SearchInput("kr".to_string()));
    tokio::time::sleep(debounce + Duration::from_millis(50)).await;
    screen.process().await;

    println!();
    println!("{}", screen.render().to_plain_text());

    tokio::time::sleep(Duration::from_millis(150)).await;
    info!("Location after demo: {}", location.query());
    println!("\nlocation: ?{}", location.query());
}

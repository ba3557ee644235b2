//! Tests for the SQLite settings store.

use serde::{Deserialize, Serialize};

use backoffice::settings::{
    SettingsBackend, SettingsError, SettingsPreferenceStore, SettingsProvider, SqliteBackend,
};
use tablekit::preferences::{PreferenceStore, TablePreferences};
use tablekit::visibility::VisibleColumns;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Density {
    compact: bool,
    row_height: u16,
}

async fn provider() -> SettingsProvider {
    SettingsProvider::new(SqliteBackend::in_memory().await.unwrap())
}

#[tokio::test]
async fn test_typed_round_trip() {
    let settings = provider().await;
    let density = Density {
        compact: true,
        row_height: 28,
    };
    settings.set("density", &density).await.unwrap();
    assert_eq!(settings.get::<Density>("density").await.unwrap(), Some(density));
    assert_eq!(settings.get::<Density>("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_replaces_value() {
    let settings = provider().await;
    settings.set("theme", &"light".to_string()).await.unwrap();
    settings.set("theme", &"dark".to_string()).await.unwrap();
    assert_eq!(
        settings.get::<String>("theme").await.unwrap().as_deref(),
        Some("dark")
    );
}

#[tokio::test]
async fn test_wrong_type_is_a_deserialization_error() {
    let settings = provider().await;
    settings.set("flag", &true).await.unwrap();
    assert!(matches!(
        settings.get::<Density>("flag").await,
        Err(SettingsError::Deserialization { .. })
    ));
}

#[tokio::test]
async fn test_prefix_is_literal() {
    let backend = SqliteBackend::in_memory().await.unwrap();
    backend.set_bytes("a_b:1", vec![1]).await.unwrap();
    backend.set_bytes("axb:2", vec![2]).await.unwrap();
    backend.set_bytes("a_b%:3", vec![3]).await.unwrap();

    let mut keys = backend.keys_with_prefix("a_b").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["a_b%:3".to_string(), "a_b:1".to_string()]);
}

#[tokio::test]
async fn test_preferences_are_stored_per_table() {
    let store = SettingsPreferenceStore::new(provider().await);
    assert_eq!(store.load("currencies").await.unwrap(), None);

    let prefs = TablePreferences::new(20).with_visible_columns(VisibleColumns::only(["code"]));
    store.save("currencies", &prefs).await.unwrap();
    store.save("roles", &TablePreferences::new(50)).await.unwrap();

    assert_eq!(store.load("currencies").await.unwrap(), Some(prefs));
    assert_eq!(store.load("roles").await.unwrap().unwrap().page_size, 50);
    assert_eq!(store.table_ids().await.unwrap(), vec!["currencies", "roles"]);
}

#[tokio::test]
async fn test_reopened_database_keeps_preferences() {
    let dir = std::env::temp_dir().join(format!("backoffice-settings-{}", std::process::id()));
    let path = dir.join("settings.db");
    {
        let store = SettingsPreferenceStore::new(SettingsProvider::new(
            SqliteBackend::open(&path).await.unwrap(),
        ));
        store
            .save("languages", &TablePreferences::new(100))
            .await
            .unwrap();
    }

    let store = SettingsPreferenceStore::new(SettingsProvider::new(
        SqliteBackend::open(&path).await.unwrap(),
    ));
    assert_eq!(
        store.load("languages").await.unwrap(),
        Some(TablePreferences::new(100))
    );
    let _ = std::fs::remove_dir_all(&dir);
}

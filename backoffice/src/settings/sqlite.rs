//! SQLite settings storage.

use std::path::Path;

use async_sqlite::{Client, ClientBuilder};
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use super::{SettingsBackend, SettingsError};

/// SQLite-backed storage. Reads are served from a write-through cache.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!("Opening settings database at {}", path.display());
        let client = ClientBuilder::new().path(path).open().await?;
        Self::with_client(client).await
    }

    /// A private in-memory database.
    pub async fn in_memory() -> Result<Self, SettingsError> {
        let client = ClientBuilder::new().open().await?;
        Self::with_client(client).await
    }

    async fn with_client(client: Client) -> Result<Self, SettingsError> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS settings (
                        key TEXT PRIMARY KEY,
                        value BLOB NOT NULL
                    )",
                    [],
                )
            })
            .await?;
        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let owned = key.to_string();
        let stored = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
                let mut rows = stmt.query([&owned])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        if let Some(value) = &stored {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(stored)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let owned = key.to_string();
        let bytes = value.clone();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO settings (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![&owned, &bytes],
                )
            })
            .await?;
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        // Escape LIKE wildcards so a prefix such as "table_prefs" matches literally.
        let pattern = format!(
            "{}%",
            prefix
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_")
        );
        let keys = self
            .client
            .conn(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT key FROM settings WHERE key LIKE ?1 ESCAPE '\\'")?;
                let rows = stmt.query_map([&pattern], |row| row.get(0))?;
                rows.collect::<Result<Vec<String>, _>>()
            })
            .await?;
        Ok(keys)
    }
}

//! Table preferences persisted through [`SettingsProvider`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tablekit::preferences::{PreferenceError, PreferenceStore, TablePreferences};
use tablekit::visibility::VisibleColumns;

use super::{SettingsError, SettingsProvider};

/// Key prefix of every stored table preference.
pub const PREFERENCE_PREFIX: &str = "table-prefs:";

/// Storage layout, kept independent of the engine types.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreferences {
    page_size: u32,
    visible_columns: Option<Vec<String>>,
}

impl From<&TablePreferences> for StoredPreferences {
    fn from(prefs: &TablePreferences) -> Self {
        Self {
            page_size: prefs.page_size,
            visible_columns: prefs
                .visible_columns
                .ids()
                .map(|ids| ids.iter().cloned().collect()),
        }
    }
}

impl From<StoredPreferences> for TablePreferences {
    fn from(stored: StoredPreferences) -> Self {
        let prefs = TablePreferences::new(stored.page_size);
        match stored.visible_columns {
            Some(ids) => prefs.with_visible_columns(VisibleColumns::only(ids)),
            None => prefs,
        }
    }
}

impl From<SettingsError> for PreferenceError {
    fn from(e: SettingsError) -> Self {
        match e {
            SettingsError::Serialization(_) | SettingsError::Deserialization { .. } => {
                PreferenceError::Encoding(e.to_string())
            }
            SettingsError::Database(_) | SettingsError::Io(_) => {
                PreferenceError::Storage(e.to_string())
            }
        }
    }
}

/// [`PreferenceStore`] under the `table-prefs:<table_id>` keys.
#[derive(Clone)]
pub struct SettingsPreferenceStore {
    settings: SettingsProvider,
}

impl SettingsPreferenceStore {
    pub fn new(settings: SettingsProvider) -> Self {
        Self { settings }
    }

    pub fn key(table_id: &str) -> String {
        format!("{}{}", PREFERENCE_PREFIX, table_id)
    }

    /// Ids of every table with stored preferences.
    pub async fn table_ids(&self) -> Result<Vec<String>, PreferenceError> {
        let mut ids: Vec<String> = self
            .settings
            .keys_with_prefix(PREFERENCE_PREFIX)
            .await?
            .into_iter()
            .filter_map(|key| key.strip_prefix(PREFERENCE_PREFIX).map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl PreferenceStore for SettingsPreferenceStore {
    async fn load(&self, table_id: &str) -> Result<Option<TablePreferences>, PreferenceError> {
        let stored: Option<StoredPreferences> = self.settings.get(&Self::key(table_id)).await?;
        Ok(stored.map(TablePreferences::from))
    }

    async fn save(&self, table_id: &str, prefs: &TablePreferences) -> Result<(), PreferenceError> {
        self.settings
            .set(&Self::key(table_id), &StoredPreferences::from(prefs))
            .await?;
        Ok(())
    }
}

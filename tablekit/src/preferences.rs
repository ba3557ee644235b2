//! Per-table view preferences.
//!
//! Preferences are keyed by a caller-chosen table id; two tables mounted with
//! the same id share them. They are created with defaults on first mount and
//! updated on page-size or visibility changes. Nothing here deletes them.

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::visibility::VisibleColumns;

/// Preference store error.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage error: {0}")]
    Storage(String),
    #[error("preference encoding error: {0}")]
    Encoding(String),
}

/// Persisted view state of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePreferences {
    pub page_size: u32,
    #[serde(default)]
    pub visible_columns: VisibleColumns,
}

impl TablePreferences {
    /// Defaults for a table that has never been mounted.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            visible_columns: VisibleColumns::all(),
        }
    }

    /// Load stored preferences, or store and return `defaults` on first mount.
    ///
    /// Store failures are logged and yield `defaults`.
    pub async fn load_or_init(
        store: &dyn PreferenceStore,
        table_id: &str,
        defaults: TablePreferences,
    ) -> TablePreferences {
        match store.load(table_id).await {
            Ok(Some(prefs)) => prefs,
            Ok(None) => {
                debug!("No preferences for table '{}', storing defaults", table_id);
                if let Err(e) = store.save(table_id, &defaults).await {
                    warn!("Failed to store preferences for table '{}': {}", table_id, e);
                }
                defaults
            }
            Err(e) => {
                warn!("Failed to load preferences for table '{}': {}", table_id, e);
                defaults
            }
        }
    }

    /// Save, logging failures.
    pub async fn persist(&self, store: &dyn PreferenceStore, table_id: &str) -> bool {
        match store.save(table_id, self).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save preferences for table '{}': {}", table_id, e);
                false
            }
        }
    }

    pub fn with_page_size(&self, page_size: u32) -> Self {
        Self {
            page_size,
            visible_columns: self.visible_columns.clone(),
        }
    }

    pub fn with_visible_columns(&self, visible_columns: VisibleColumns) -> Self {
        Self {
            page_size: self.page_size,
            visible_columns,
        }
    }
}

/// Keyed persistence for [`TablePreferences`].
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self, table_id: &str) -> Result<Option<TablePreferences>, PreferenceError>;

    async fn save(&self, table_id: &str, prefs: &TablePreferences) -> Result<(), PreferenceError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: DashMap<String, TablePreferences>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self, table_id: &str) -> Result<Option<TablePreferences>, PreferenceError> {
        Ok(self.entries.get(table_id).map(|e| e.value().clone()))
    }

    async fn save(&self, table_id: &str, prefs: &TablePreferences) -> Result<(), PreferenceError> {
        self.entries.insert(table_id.to_string(), prefs.clone());
        Ok(())
    }
}

//! Table engine configuration.

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Per-table configuration.
///
/// Every field has a default, so a partial JSON document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Quiet period before a search keystroke is committed.
    pub search_debounce_ms: u64,
    /// Maximum number of page buttons in the pagination window.
    pub max_visible_pages: u32,
    /// Choices offered by the page-size selector.
    pub page_size_options: Vec<u32>,
    /// Page size used before any preference is stored.
    pub default_page_size: u32,
    /// Number of placeholder rows shown while loading.
    pub skeleton_rows: usize,
    /// Message shown when there are no rows.
    pub empty_message: String,
    /// Placeholder of the search box.
    pub search_placeholder: String,
    /// Locale used for calendar dates, e.g. `en_US`.
    pub locale: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 400,
            max_visible_pages: 5,
            page_size_options: vec![10, 20, 50, 100],
            default_page_size: 10,
            skeleton_rows: 5,
            empty_message: "No results found.".to_string(),
            search_placeholder: "Search...".to_string(),
            locale: "en_US".to_string(),
        }
    }
}

impl TableConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document, falling back to defaults when it is unusable.
    pub fn from_json_or_default(raw: &str) -> Self {
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring table configuration: {}", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_visible_pages == 0 {
            return Err(ConfigError::Invalid(
                "max_visible_pages must be at least 1".into(),
            ));
        }
        if self.default_page_size == 0 || self.page_size_options.contains(&0) {
            return Err(ConfigError::Invalid("page sizes must be positive".into()));
        }
        Ok(())
    }

    /// Debounce delay as a duration.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Set the search debounce delay.
    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.search_debounce_ms = ms;
        self
    }

    /// Set the page-size choices.
    pub fn page_sizes(mut self, sizes: impl Into<Vec<u32>>) -> Self {
        self.page_size_options = sizes.into();
        self
    }

    /// Set the default page size.
    pub fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set the empty-state message.
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Set the locale used for calendar dates.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TableConfig::from_json(r#"{"search_debounce_ms": 250}"#).unwrap();
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.max_visible_pages, 5);
        assert_eq!(config.page_size_options, vec![10, 20, 50, 100]);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let config = TableConfig::from_json_or_default("{not json");
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = TableConfig::from_json(r#"{"max_visible_pages": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}

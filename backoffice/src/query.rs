//! List state mirrored into the location's query string.
//!
//! `page`, `limit` and `search` are always understood; screens add their own
//! filter keys. Writes are debounced and replace the current history entry.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::form_urlencoded;

/// Quiet period before the location is rewritten.
pub const MIRROR_DELAY: Duration = Duration::from_millis(100);

/// Query parsing error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("'{key}' must be a positive number, got '{value}'")]
    InvalidNumber { key: String, value: String },
    #[error("'{key}' must be true or false, got '{value}'")]
    InvalidBool { key: String, value: String },
}

/// A filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
}

impl FilterValue {
    /// Query-string form.
    pub fn encode(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Bool(b) => b.to_string(),
        }
    }
}

/// Kind of a screen filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Bool,
}

/// Filter keys a screen understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSchema {
    keys: BTreeMap<String, FilterKind>,
}

impl FilterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into(), FilterKind::Text);
        self
    }

    pub fn boolean(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into(), FilterKind::Bool);
        self
    }

    pub fn kind(&self, key: &str) -> Option<FilterKind> {
        self.keys.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = (&str, FilterKind)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Paging, search and filters of a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    /// Unset filters are absent.
    pub filters: BTreeMap<String, FilterValue>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Number of filters set.
    pub fn active_filters(&self) -> usize {
        self.filters.len()
    }

    /// Encode as `page=2&limit=20&search=eu&active=true`.
    ///
    /// An empty search is omitted.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        out.append_pair("page", &self.page.to_string());
        out.append_pair("limit", &self.limit.to_string());
        if !self.search.is_empty() {
            out.append_pair("search", &self.search);
        }
        for (key, value) in &self.filters {
            out.append_pair(key, &value.encode());
        }
        out.finish()
    }

    /// Parse a query string, keeping `defaults` for absent keys.
    ///
    /// Keys outside `schema` are ignored.
    pub fn parse(
        query: &str,
        schema: &FilterSchema,
        defaults: &ListQuery,
    ) -> Result<ListQuery, QueryError> {
        let mut parsed = defaults.clone();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "page" => parsed.page = parse_positive(&key, &value)?,
                "limit" => parsed.limit = parse_positive(&key, &value)?,
                "search" => parsed.search = value.into_owned(),
                other => match schema.kind(other) {
                    Some(FilterKind::Text) => {
                        if !value.is_empty() {
                            parsed
                                .filters
                                .insert(other.to_string(), FilterValue::Text(value.into_owned()));
                        }
                    }
                    Some(FilterKind::Bool) => {
                        let flag = match &*value {
                            "true" => true,
                            "false" => false,
                            _ => {
                                return Err(QueryError::InvalidBool {
                                    key: other.to_string(),
                                    value: value.to_string(),
                                });
                            }
                        };
                        parsed
                            .filters
                            .insert(other.to_string(), FilterValue::Bool(flag));
                    }
                    None => debug!("Ignoring unknown query key '{}'", other),
                },
            }
        }
        Ok(parsed)
    }

    /// Parse, logging and falling back to `defaults` on malformed input.
    pub fn parse_or_default(query: &str, schema: &FilterSchema, defaults: &ListQuery) -> ListQuery {
        match Self::parse(query, schema, defaults) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Ignoring malformed query '{}': {}", query, e);
                defaults.clone()
            }
        }
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, QueryError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(QueryError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Where the query string lives (the browser location, a router).
pub trait Location: Send + Sync {
    fn query(&self) -> String;

    /// Replace the current history entry's query string.
    fn replace_query(&self, query: &str);
}

/// In-memory location recording every replace.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    state: Mutex<LocationState>,
}

#[derive(Debug, Default)]
struct LocationState {
    query: String,
    replaces: usize,
}

impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(LocationState {
                query: query.into(),
                replaces: 0,
            }),
        }
    }

    /// Number of replaces so far.
    pub fn replace_count(&self) -> usize {
        self.state.lock().map(|s| s.replaces).unwrap_or(0)
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.state.lock().map(|s| s.query.clone()).unwrap_or_default()
    }

    fn replace_query(&self, query: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.query = query.to_string();
            state.replaces += 1;
        }
    }
}

/// Debounced writer of a [`ListQuery`] into a [`Location`].
pub struct QueryMirror {
    location: Arc<dyn Location>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl QueryMirror {
    pub fn new(location: Arc<dyn Location>) -> Self {
        Self {
            location,
            delay: MIRROR_DELAY,
            pending: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn location(&self) -> &Arc<dyn Location> {
        &self.location
    }

    /// Schedule a write of `query`, superseding any pending one.
    ///
    /// Without a tokio runtime the location is written immediately.
    pub fn write(&mut self, query: &ListQuery) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let encoded = query.to_query_string();
        let Ok(handle) = Handle::try_current() else {
            replace_if_changed(self.location.as_ref(), &encoded);
            return;
        };
        let location = Arc::clone(&self.location);
        let delay = self.delay;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            replace_if_changed(location.as_ref(), &encoded);
        }));
    }
}

impl Drop for QueryMirror {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

fn replace_if_changed(location: &dyn Location, encoded: &str) {
    if location.query() == encoded {
        return;
    }
    debug!("Query mirrored: {}", encoded);
    location.replace_query(encoded);
}

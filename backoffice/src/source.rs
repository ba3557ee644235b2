//! Remote list sources.
//!
//! Screens talk to the back end through [`ListSource`]; the engine itself
//! never fetches. [`MemorySource`] serves the demo and the tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use log::debug;
use thiserror::Error;
use tokio::sync::RwLock;

use tablekit::selection::RowId;
use tablekit::sort::SortDescriptor;
use tablekit::table::{CellValue, TableRow};

use crate::query::{FilterValue, ListQuery};

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matching items across all pages.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// A listing request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListRequest {
    pub query: ListQuery,
    pub sort: Option<SortDescriptor>,
}

/// List source error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("item {0} not found")]
    NotFound(RowId),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// CRUD access to one resource.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: TableRow;

    async fn list(&self, request: &ListRequest) -> Result<Page<Self::Item>, SourceError>;

    async fn create(&self, item: Self::Item) -> Result<Self::Item, SourceError>;

    async fn update(&self, id: &RowId, item: Self::Item) -> Result<Self::Item, SourceError>;

    async fn delete(&self, id: &RowId) -> Result<(), SourceError>;
}

/// The state of a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceState<T> {
    /// Not requested yet
    #[default]
    Idle,
    Loading,
    Ready(T),
    Error(SourceError),
}

impl<T> ResourceState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&SourceError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// In-memory source with search, filters, sort and paging.
pub struct MemorySource<T: TableRow> {
    items: RwLock<Vec<T>>,
    search_fields: Vec<String>,
    unavailable: AtomicBool,
}

impl<T: TableRow> MemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            search_fields: Vec::new(),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Fields matched by free-text search.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Make every request fail until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), SourceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("memory source offline".to_string()));
        }
        Ok(())
    }

    fn matches(&self, item: &T, query: &ListQuery) -> bool {
        let search = query.search.trim().to_lowercase();
        if !search.is_empty() {
            let hit = self.search_fields.iter().any(|field| {
                item.field(field)
                    .search_text()
                    .is_some_and(|text| text.contains(&search))
            });
            if !hit {
                return false;
            }
        }
        query.filters.iter().all(|(key, expected)| {
            match (item.field(key), expected) {
                (CellValue::Bool(actual), FilterValue::Bool(wanted)) => actual == *wanted,
                (CellValue::Null, _) => false,
                (actual, FilterValue::Text(wanted)) => {
                    actual.display().eq_ignore_ascii_case(wanted)
                }
                (actual, FilterValue::Bool(wanted)) => actual.display() == wanted.to_string(),
            }
        })
    }
}

#[async_trait]
impl<T: TableRow> ListSource for MemorySource<T> {
    type Item = T;

    async fn list(&self, request: &ListRequest) -> Result<Page<T>, SourceError> {
        self.check_available()?;
        let query = &request.query;
        if query.limit == 0 {
            return Err(SourceError::Rejected("limit must be positive".to_string()));
        }

        let mut matching: Vec<T> = self
            .items
            .read()
            .await
            .iter()
            .filter(|item| self.matches(item, query))
            .cloned()
            .collect();

        if let Some(sort) = &request.sort {
            matching.sort_by(|a, b| {
                sort.direction
                    .apply(a.field(&sort.column).compare(&b.field(&sort.column)))
            });
        }

        let total = matching.len() as u64;
        let offset = (query.page.max(1) as usize - 1).saturating_mul(query.limit as usize);
        let items: Vec<T> = matching
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .collect();
        debug!(
            "Listed {} of {} items (page {}, limit {})",
            items.len(),
            total,
            query.page,
            query.limit
        );
        Ok(Page {
            items,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    async fn create(&self, item: T) -> Result<T, SourceError> {
        self.check_available()?;
        let mut items = self.items.write().await;
        if let Some(id) = item.id()
            && items.iter().any(|existing| existing.id().as_ref() == Some(&id))
        {
            return Err(SourceError::Rejected(format!("duplicate id {}", id)));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &RowId, item: T) -> Result<T, SourceError> {
        self.check_available()?;
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|existing| existing.id().as_ref() == Some(id))
            .ok_or_else(|| SourceError::NotFound(id.clone()))?;
        *slot = item.clone();
        Ok(item)
    }

    async fn delete(&self, id: &RowId) -> Result<(), SourceError> {
        self.check_available()?;
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|existing| existing.id().as_ref() != Some(id));
        if items.len() == before {
            return Err(SourceError::NotFound(id.clone()));
        }
        Ok(())
    }
}

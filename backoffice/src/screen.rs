//! Admin list screen.
//!
//! A [`ListScreen`] owns every descriptor the table renders: sort, selection,
//! visible columns, page, page size, search and filters. Table callbacks only
//! post a [`ScreenMessage`]; [`ListScreen::process`] applies them, persists
//! preferences, mirrors the query string and reloads from the source.

use std::sync::Arc;

use log::{debug, error, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use tablekit::config::TableConfig;
use tablekit::events::{Callback, callback};
use tablekit::node::{Layout, Node, Tone};
use tablekit::pagination::{PaginationDescriptor, total_pages};
use tablekit::preferences::{PreferenceStore, TablePreferences};
use tablekit::selection::{RowId, Selection};
use tablekit::sort::SortDescriptor;
use tablekit::table::{Column, DataTable, EmptyState, TableProps, TableRow};
use tablekit::toolbar::BulkAction;
use tablekit::visibility::VisibleColumns;

use crate::query::{FilterKind, FilterSchema, FilterValue, ListQuery, Location, QueryMirror};
use crate::source::{ListRequest, ListSource, Page, ResourceState, SourceError};

/// Bulk action value that deletes the selection.
pub const DELETE_ACTION: &str = "delete";

/// A filter offered in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
}

impl FilterField {
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FilterKind::Text,
        }
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FilterKind::Bool,
        }
    }
}

/// Static description of a list screen.
#[derive(Debug, Clone)]
pub struct ScreenDefinition<T> {
    /// Also the preference key.
    pub table_id: String,
    pub title: String,
    pub columns: Vec<Column<T>>,
    pub filters: Vec<FilterField>,
    pub bulk_actions: Vec<BulkAction>,
    pub empty_message: Option<String>,
    /// Label of the empty-state create button.
    pub create_label: Option<String>,
}

impl<T> ScreenDefinition<T> {
    pub fn new(table_id: impl Into<String>, title: impl Into<String>, columns: Vec<Column<T>>) -> Self {
        Self {
            table_id: table_id.into(),
            title: title.into(),
            columns,
            filters: Vec::new(),
            bulk_actions: Vec::new(),
            empty_message: None,
            create_label: None,
        }
    }

    pub fn filter(mut self, field: FilterField) -> Self {
        self.filters.push(field);
        self
    }

    pub fn bulk_action(mut self, action: BulkAction) -> Self {
        self.bulk_actions.push(action);
        self
    }

    pub fn empty(mut self, message: impl Into<String>, create_label: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self.create_label = Some(create_label.into());
        self
    }

    /// Query keys understood by this screen.
    pub fn schema(&self) -> FilterSchema {
        self.filters
            .iter()
            .fold(FilterSchema::new(), |schema, field| match field.kind {
                FilterKind::Text => schema.text(field.key.clone()),
                FilterKind::Bool => schema.boolean(field.key.clone()),
            })
    }
}

/// Intent posted by a table callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenMessage {
    Sort(SortDescriptor),
    Select(Selection),
    Columns(VisibleColumns),
    Search(String),
    Page(u32),
    PageSize(u32),
    ToggleFilters(bool),
    Bulk(String),
    Open(RowId),
    Create,
    Retry,
}

/// A mounted list screen.
pub struct ListScreen<S: ListSource> {
    definition: ScreenDefinition<S::Item>,
    source: Arc<S>,
    store: Arc<dyn PreferenceStore>,
    prefs: TablePreferences,
    mirror: QueryMirror,
    query: ListQuery,
    sort: Option<SortDescriptor>,
    selection: Selection,
    show_filters: bool,
    data: ResourceState<Page<S::Item>>,
    table: DataTable<S::Item>,
    tx: UnboundedSender<ScreenMessage>,
    rx: UnboundedReceiver<ScreenMessage>,
    navigation: Option<String>,
}

impl<S: ListSource> ListScreen<S> {
    /// Mount: load preferences, read the query string and fetch the first page.
    pub async fn mount(
        definition: ScreenDefinition<S::Item>,
        source: Arc<S>,
        store: Arc<dyn PreferenceStore>,
        location: Arc<dyn Location>,
        config: TableConfig,
    ) -> Self {
        let prefs = TablePreferences::load_or_init(
            store.as_ref(),
            &definition.table_id,
            TablePreferences::new(config.default_page_size),
        )
        .await;
        let defaults = ListQuery::new(prefs.page_size);
        let query =
            ListQuery::parse_or_default(&location.query(), &definition.schema(), &defaults);
        debug!(
            "Mounting '{}' at page {} (limit {})",
            definition.table_id, query.page, query.limit
        );

        let (tx, rx) = mpsc::unbounded_channel();
        let table = DataTable::new(
            TableProps::new(definition.columns.clone(), Vec::new()).loading(true),
            config,
        );
        let mut screen = Self {
            definition,
            source,
            store,
            prefs,
            mirror: QueryMirror::new(location),
            query,
            sort: None,
            selection: Selection::new(),
            show_filters: false,
            data: ResourceState::Idle,
            table,
            tx,
            rx,
            navigation: None,
        };
        screen.mirror.write(&screen.query);
        screen.reload().await;
        screen
    }

    pub fn definition(&self) -> &ScreenDefinition<S::Item> {
        &self.definition
    }

    pub fn table(&self) -> &DataTable<S::Item> {
        &self.table
    }

    /// The table, for dispatching interactions. Call [`process`](Self::process)
    /// afterwards.
    pub fn table_mut(&mut self) -> &mut DataTable<S::Item> {
        &mut self.table
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn sort(&self) -> Option<&SortDescriptor> {
        self.sort.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn preferences(&self) -> &TablePreferences {
        &self.prefs
    }

    pub fn data(&self) -> &ResourceState<Page<S::Item>> {
        &self.data
    }

    /// Route requested by a row click or the create button, if any.
    pub fn take_navigation(&mut self) -> Option<String> {
        self.navigation.take()
    }

    /// Title and table.
    pub fn render(&self) -> Node {
        Node::column(vec![
            Node::text_toned(self.definition.title.clone(), Tone::Strong),
            self.table.render(),
        ])
    }

    /// Apply posted messages. Returns how many were handled.
    pub async fn process(&mut self) -> usize {
        let mut handled = 0;
        let mut reload = false;
        let mut persist = false;

        while let Ok(message) = self.rx.try_recv() {
            handled += 1;
            match message {
                ScreenMessage::Sort(sort) => {
                    self.sort = Some(sort);
                    reload = true;
                }
                ScreenMessage::Select(selection) => self.selection = selection,
                ScreenMessage::Columns(visible) => {
                    self.prefs = self.prefs.with_visible_columns(visible);
                    persist = true;
                }
                ScreenMessage::Search(search) => {
                    if search != self.query.search {
                        self.query.search = search;
                        self.query.page = 1;
                        reload = true;
                    }
                }
                ScreenMessage::Page(page) => {
                    self.query.page = page;
                    reload = true;
                }
                ScreenMessage::PageSize(limit) => {
                    self.query.limit = limit;
                    self.query.page = 1;
                    self.prefs = self.prefs.with_page_size(limit);
                    persist = true;
                    reload = true;
                }
                ScreenMessage::ToggleFilters(shown) => self.show_filters = shown,
                ScreenMessage::Bulk(action) => reload |= self.run_bulk_action(&action).await,
                ScreenMessage::Open(id) => {
                    self.navigation = Some(format!("/{}/{}", self.definition.table_id, id));
                }
                ScreenMessage::Create => {
                    self.navigation = Some(format!("/{}/new", self.definition.table_id));
                }
                ScreenMessage::Retry => reload = true,
            }
        }

        if persist {
            self.prefs
                .persist(self.store.as_ref(), &self.definition.table_id)
                .await;
        }
        if reload {
            self.mirror.write(&self.query);
            self.reload().await;
        } else if handled > 0 {
            self.sync_table();
        }
        handled
    }

    /// Set or clear a filter. Returns to page 1.
    pub async fn set_filter(&mut self, key: &str, value: Option<FilterValue>) {
        match value {
            Some(value) => self.query.filters.insert(key.to_string(), value),
            None => self.query.filters.remove(key),
        };
        self.query.page = 1;
        self.mirror.write(&self.query);
        self.reload().await;
    }

    /// Fetch the current page.
    ///
    /// A page past the end of a non-empty listing moves to the last page and
    /// is fetched again.
    pub async fn reload(&mut self) {
        self.data = ResourceState::Loading;
        self.sync_table();

        let mut result = self.fetch().await;
        if let Ok(page) = &result {
            let last = total_pages(page.total, self.query.limit);
            if page.total > 0 && self.query.page > last {
                debug!(
                    "Page {} of '{}' is past the end; moving to {}",
                    self.query.page, self.definition.table_id, last
                );
                self.query.page = last;
                self.mirror.write(&self.query);
                result = self.fetch().await;
            }
        }

        self.data = match result {
            Ok(page) => ResourceState::Ready(page),
            Err(e) => {
                error!("Failed to load '{}': {}", self.definition.table_id, e);
                ResourceState::Error(e)
            }
        };
        self.sync_table();
    }

    async fn fetch(&self) -> Result<Page<S::Item>, SourceError> {
        let request = ListRequest {
            query: self.query.clone(),
            sort: self.sort.clone(),
        };
        self.source.list(&request).await
    }

    /// Delete the selection. Ids the source fails to delete stay selected.
    async fn run_bulk_action(&mut self, action: &str) -> bool {
        if action != DELETE_ACTION {
            debug!("No handler for bulk action '{}'", action);
            return false;
        }
        let ids = self.selection.sorted_ids();
        let mut remaining = self.selection.clone();
        for id in &ids {
            match self.source.delete(id).await {
                Ok(()) => remaining = remaining.with_row(id, false),
                Err(e) => {
                    warn!("Failed to delete {} from '{}': {}", id, self.definition.table_id, e)
                }
            }
        }
        debug!(
            "Deleted {} of {} selected from '{}'",
            ids.len() - remaining.len(),
            ids.len(),
            self.definition.table_id
        );
        self.selection = remaining;
        true
    }

    fn sync_table(&mut self) {
        let props = self.props();
        self.table.set_props(props);
    }

    fn emit<A: Send + 'static>(&self, wrap: fn(A) -> ScreenMessage) -> Callback<A> {
        let tx = self.tx.clone();
        callback(move |value| {
            if tx.send(wrap(value)).is_err() {
                debug!("Screen gone; dropping table event");
            }
        })
    }

    fn props(&self) -> TableProps<S::Item> {
        let page = self.data.as_ready();
        let rows = page.map(|p| p.items.clone()).unwrap_or_default();
        let total = page.map_or(0, |p| p.total);

        let pagination = PaginationDescriptor::new(
            self.query.page,
            total_pages(total, self.query.limit),
            self.emit(ScreenMessage::Page),
        )
        .items(total, self.query.limit)
        .on_items_per_page_change(self.emit(ScreenMessage::PageSize));

        let mut props = TableProps::new(self.definition.columns.clone(), rows)
            .table_id(self.definition.table_id.clone())
            .loading(self.data.is_loading())
            .sort(self.sort.clone(), self.emit(ScreenMessage::Sort))
            .selection(self.selection.clone(), self.emit(ScreenMessage::Select))
            .visible_columns(
                self.prefs.visible_columns.clone(),
                self.emit(ScreenMessage::Columns),
            )
            .search(self.query.search.clone(), self.emit(ScreenMessage::Search))
            .pagination(pagination);

        if !self.definition.filters.is_empty() {
            props = props.filters(
                self.show_filters,
                self.query.active_filters(),
                self.emit(ScreenMessage::ToggleFilters),
            );
            props.toolbar.filter_panel = Some(self.filter_panel());
        }
        if !self.definition.bulk_actions.is_empty() {
            props = props.bulk_actions(
                self.definition.bulk_actions.clone(),
                self.emit(ScreenMessage::Bulk),
            );
        }

        let tx = self.tx.clone();
        props = props.on_row_click(move |item: &S::Item, _| {
            if let Some(id) = item.id()
                && tx.send(ScreenMessage::Open(id)).is_err()
            {
                debug!("Screen gone; dropping row click");
            }
        });

        match self.data.as_error() {
            Some(e) => props
                .empty_state(EmptyState {
                    message: Some(format!("Could not load {}: {}", self.definition.title, e)),
                    action_label: Some("Retry".to_string()),
                })
                .on_empty_action(self.emit(|()| ScreenMessage::Retry)),
            None => {
                let props = props.empty_state(EmptyState {
                    message: self.definition.empty_message.clone(),
                    action_label: self.definition.create_label.clone(),
                });
                if self.definition.create_label.is_some() {
                    props.on_empty_action(self.emit(|()| ScreenMessage::Create))
                } else {
                    props
                }
            }
        }
    }

    fn filter_panel(&self) -> Node {
        let fields = self
            .definition
            .filters
            .iter()
            .map(|field| {
                let current = self.query.filters.get(&field.key);
                let control = match field.kind {
                    FilterKind::Text => Node::Input {
                        id: format!("filter-{}", field.key),
                        value: match current {
                            Some(FilterValue::Text(s)) => s.clone(),
                            _ => String::new(),
                        },
                        placeholder: field.label.clone(),
                    },
                    FilterKind::Bool => Node::Checkbox {
                        id: format!("filter-{}", field.key),
                        label: Some(field.label.clone()),
                        checked: current == Some(&FilterValue::Bool(true)),
                        indeterminate: current.is_none(),
                    },
                };
                Node::row(vec![
                    Node::text_toned(field.label.clone(), Tone::Muted),
                    control,
                ])
            })
            .collect();
        Node::column_with(Layout::default().class("filters"), fields)
    }
}

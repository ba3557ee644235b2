//! Data table component.
//!
//! [`DataTable`] composes the sort, selection, visibility, pagination and
//! search engines with caller column and row definitions. The host owns every
//! descriptor; the table only keeps transient UI state (the search echo, the
//! hovered row and whether the column menu is open).

mod cell;
mod column;
mod events;
mod render;
mod state;

use std::sync::Arc;

use chrono::{DateTime, Locale, Utc};

pub use cell::{
    CellContext, CellResult, ERROR_PLACEHOLDER, RenderFault, default_cell, extract_panic_message,
    render_cell, try_render_cell,
};
pub use column::{
    Accessor, CellValue, Column, ColumnKind, ComputeFn, RenderFn, TableRow, assign_default_ids,
    ok_text,
};
pub use events::TableEvent;
pub use state::{
    EmptyState, RenderState, RowAttrs, RowAttrsFn, RowCallback, RowHandler, TableCallbacks,
    TableProps,
};

use crate::config::TableConfig;
use crate::format::resolve_locale;
use crate::search::DebouncedSearch;

/// Source of "now" for relative timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A controlled data table.
pub struct DataTable<T: TableRow> {
    props: TableProps<T>,
    config: TableConfig,
    locale: Locale,
    search: Option<DebouncedSearch>,
    hovered_row: Option<usize>,
    column_menu_open: bool,
    clock: Clock,
}

impl<T: TableRow> std::fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("props", &self.props)
            .field("search", &self.search)
            .field("hovered_row", &self.hovered_row)
            .field("column_menu_open", &self.column_menu_open)
            .finish_non_exhaustive()
    }
}

impl<T: TableRow> DataTable<T> {
    /// Mount a table.
    pub fn new(mut props: TableProps<T>, config: TableConfig) -> Self {
        assign_default_ids(&mut props.columns);
        let search = props.callbacks.on_search_change.clone().map(|on_commit| {
            DebouncedSearch::new(
                props.toolbar.search_value.clone(),
                config.search_debounce(),
                on_commit,
            )
        });
        Self {
            locale: resolve_locale(&config.locale),
            props,
            config,
            search,
            hovered_row: None,
            column_menu_open: false,
            clock: Arc::new(Utc::now),
        }
    }

    /// Use a fixed clock for relative timestamps.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the props after the host's state changed.
    ///
    /// A changed search value from the host overrides the local echo and
    /// cancels any pending commit.
    pub fn set_props(&mut self, mut props: TableProps<T>) {
        assign_default_ids(&mut props.columns);
        match (&mut self.search, props.callbacks.on_search_change.clone()) {
            (Some(search), Some(on_commit)) => {
                search.set_on_commit(on_commit);
                search.sync_external(&props.toolbar.search_value);
            }
            (None, Some(on_commit)) => {
                self.search = Some(DebouncedSearch::new(
                    props.toolbar.search_value.clone(),
                    self.config.search_debounce(),
                    on_commit,
                ));
            }
            (_, None) => self.search = None,
        }
        if self.hovered_row.is_some_and(|row| row >= props.rows.len()) {
            self.hovered_row = None;
        }
        self.props = props;
    }

    pub fn props(&self) -> &TableProps<T> {
        &self.props
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Branch the next render takes.
    pub fn state(&self) -> RenderState {
        self.props.render_state()
    }

    /// Local search echo, when search is enabled.
    pub fn search_value(&self) -> Option<&str> {
        self.search.as_ref().map(DebouncedSearch::value)
    }

    /// The search channel, when search is enabled.
    pub fn search(&self) -> Option<&DebouncedSearch> {
        self.search.as_ref()
    }

    pub fn hovered_row(&self) -> Option<usize> {
        self.hovered_row
    }

    pub fn is_column_menu_open(&self) -> bool {
        self.column_menu_open
    }

    fn column_picker_enabled(&self) -> bool {
        self.props.toolbar.column_picker && self.props.callbacks.on_visible_columns_change.is_some()
    }

    fn cell_context(&self) -> CellContext {
        CellContext {
            now: (self.clock)(),
            locale: self.locale,
        }
    }
}

//! Table props and callbacks.

use std::sync::Arc;

use crate::events::{Callback, CallbackSlot, Interaction};
use crate::pagination::PaginationDescriptor;
use crate::selection::Selection;
use crate::sort::SortDescriptor;
use crate::toolbar::ToolbarProps;
use crate::visibility::VisibleColumns;

use super::column::{Column, TableRow, assign_default_ids};

/// Caller handler for a row interaction.
pub type RowHandler<T> = Arc<dyn Fn(&T, usize, &mut Interaction) + Send + Sync>;

/// Row click callback.
pub type RowCallback<T> = Arc<dyn Fn(&T, usize) + Send + Sync>;

/// Computes per-row attributes.
pub type RowAttrsFn<T> = Arc<dyn Fn(&T, usize) -> RowAttrs<T> + Send + Sync>;

/// Caller-supplied attributes for one row.
///
/// Handlers run before the engine's own handling of the same event.
pub struct RowAttrs<T> {
    /// Merged with the engine's row classes.
    pub class_name: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub on_click: Option<RowHandler<T>>,
    pub on_hover: Option<RowHandler<T>>,
}

impl<T> Default for RowAttrs<T> {
    fn default() -> Self {
        Self {
            class_name: None,
            attrs: Vec::new(),
            on_click: None,
            on_hover: None,
        }
    }
}

impl<T> RowAttrs<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn on_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize, &mut Interaction) + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(f));
        self
    }

    pub fn on_hover<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize, &mut Interaction) + Send + Sync + 'static,
    {
        self.on_hover = Some(Arc::new(f));
        self
    }
}

/// Content of the empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptyState {
    /// Falls back to the configured empty message.
    pub message: Option<String>,
    /// Label of the optional action button.
    pub action_label: Option<String>,
}

/// One callback per mutable concern. `None` means the feature is absent.
pub struct TableCallbacks<T> {
    pub on_sort_change: Option<Callback<SortDescriptor>>,
    pub on_selection_change: Option<Callback<Selection>>,
    pub on_visible_columns_change: Option<Callback<VisibleColumns>>,
    pub on_search_change: Option<Callback<String>>,
    pub on_toggle_filters: Option<Callback<bool>>,
    pub on_bulk_action: Option<Callback<String>>,
    pub on_row_click: Option<RowCallback<T>>,
    pub on_empty_action: Option<Callback<()>>,
}

impl<T> Default for TableCallbacks<T> {
    fn default() -> Self {
        Self {
            on_sort_change: None,
            on_selection_change: None,
            on_visible_columns_change: None,
            on_search_change: None,
            on_toggle_filters: None,
            on_bulk_action: None,
            on_row_click: None,
            on_empty_action: None,
        }
    }
}

impl<T> Clone for TableCallbacks<T> {
    fn clone(&self) -> Self {
        Self {
            on_sort_change: self.on_sort_change.clone(),
            on_selection_change: self.on_selection_change.clone(),
            on_visible_columns_change: self.on_visible_columns_change.clone(),
            on_search_change: self.on_search_change.clone(),
            on_toggle_filters: self.on_toggle_filters.clone(),
            on_bulk_action: self.on_bulk_action.clone(),
            on_row_click: self.on_row_click.clone(),
            on_empty_action: self.on_empty_action.clone(),
        }
    }
}

impl<T> std::fmt::Debug for TableCallbacks<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableCallbacks")
            .field("on_sort_change", &CallbackSlot(self.on_sort_change.is_some()))
            .field(
                "on_selection_change",
                &CallbackSlot(self.on_selection_change.is_some()),
            )
            .field(
                "on_visible_columns_change",
                &CallbackSlot(self.on_visible_columns_change.is_some()),
            )
            .field("on_search_change", &CallbackSlot(self.on_search_change.is_some()))
            .field("on_toggle_filters", &CallbackSlot(self.on_toggle_filters.is_some()))
            .field("on_bulk_action", &CallbackSlot(self.on_bulk_action.is_some()))
            .field("on_row_click", &CallbackSlot(self.on_row_click.is_some()))
            .field("on_empty_action", &CallbackSlot(self.on_empty_action.is_some()))
            .finish()
    }
}

/// Which branch the renderer takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Loading,
    Empty,
    Populated,
}

/// Everything the host hands the table on each render.
pub struct TableProps<T> {
    /// Prefix for element ids; defaults to `table`.
    pub table_id: String,
    pub columns: Vec<Column<T>>,
    pub rows: Vec<T>,
    pub loading: bool,
    pub sort: Option<SortDescriptor>,
    /// Selection is enabled when this is set.
    pub selection: Option<Selection>,
    pub visible_columns: VisibleColumns,
    pub pagination: Option<PaginationDescriptor>,
    pub toolbar: ToolbarProps,
    pub empty_state: EmptyState,
    pub row_attrs: Option<RowAttrsFn<T>>,
    pub callbacks: TableCallbacks<T>,
}

impl<T> Clone for TableProps<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table_id: self.table_id.clone(),
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            loading: self.loading,
            sort: self.sort.clone(),
            selection: self.selection.clone(),
            visible_columns: self.visible_columns.clone(),
            pagination: self.pagination.clone(),
            toolbar: self.toolbar.clone(),
            empty_state: self.empty_state.clone(),
            row_attrs: self.row_attrs.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<T> std::fmt::Debug for TableProps<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableProps")
            .field("table_id", &self.table_id)
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("loading", &self.loading)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("visible_columns", &self.visible_columns)
            .field("pagination", &self.pagination)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

impl<T: TableRow> TableProps<T> {
    /// Props with columns and rows; unset column ids are assigned here.
    pub fn new(mut columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        assign_default_ids(&mut columns);
        Self {
            table_id: "table".to_string(),
            columns,
            rows,
            loading: false,
            sort: None,
            selection: None,
            visible_columns: VisibleColumns::all(),
            pagination: None,
            toolbar: ToolbarProps::default(),
            empty_state: EmptyState::default(),
            row_attrs: None,
            callbacks: TableCallbacks::default(),
        }
    }

    pub fn table_id(mut self, id: impl Into<String>) -> Self {
        self.table_id = id.into();
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn sort(mut self, sort: Option<SortDescriptor>, on_change: Callback<SortDescriptor>) -> Self {
        self.sort = sort;
        self.callbacks.on_sort_change = Some(on_change);
        self
    }

    pub fn selection(mut self, selection: Selection, on_change: Callback<Selection>) -> Self {
        self.selection = Some(selection);
        self.callbacks.on_selection_change = Some(on_change);
        self
    }

    pub fn visible_columns(
        mut self,
        visible: VisibleColumns,
        on_change: Callback<VisibleColumns>,
    ) -> Self {
        self.visible_columns = visible;
        self.callbacks.on_visible_columns_change = Some(on_change);
        self.toolbar.column_picker = true;
        self
    }

    pub fn pagination(mut self, pagination: PaginationDescriptor) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn search(mut self, value: impl Into<String>, on_change: Callback<String>) -> Self {
        self.toolbar.search_value = value.into();
        self.callbacks.on_search_change = Some(on_change);
        self
    }

    pub fn filters(mut self, shown: bool, active: usize, on_toggle: Callback<bool>) -> Self {
        self.toolbar.show_filters = shown;
        self.toolbar.active_filter_count = active;
        self.callbacks.on_toggle_filters = Some(on_toggle);
        self
    }

    pub fn bulk_actions(
        mut self,
        actions: Vec<crate::toolbar::BulkAction>,
        on_action: Callback<String>,
    ) -> Self {
        self.toolbar.bulk_actions = actions;
        self.callbacks.on_bulk_action = Some(on_action);
        self
    }

    pub fn toolbar(mut self, toolbar: ToolbarProps) -> Self {
        self.toolbar = toolbar;
        self
    }

    pub fn empty_state(mut self, empty: EmptyState) -> Self {
        self.empty_state = empty;
        self
    }

    pub fn on_empty_action(mut self, f: Callback<()>) -> Self {
        self.callbacks.on_empty_action = Some(f);
        self
    }

    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) + Send + Sync + 'static,
    {
        self.callbacks.on_row_click = Some(Arc::new(f));
        self
    }

    pub fn row_attrs<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) -> RowAttrs<T> + Send + Sync + 'static,
    {
        self.row_attrs = Some(Arc::new(f));
        self
    }

    /// Branch the renderer takes for these props.
    pub fn render_state(&self) -> RenderState {
        if self.loading {
            RenderState::Loading
        } else if self.rows.is_empty() {
            RenderState::Empty
        } else {
            RenderState::Populated
        }
    }

    /// Whether row selection is enabled.
    pub fn selection_enabled(&self) -> bool {
        self.selection.is_some() && self.callbacks.on_selection_change.is_some()
    }

    /// Effective columns, in declaration order.
    pub fn effective_columns(&self) -> Vec<&Column<T>> {
        self.visible_columns.effective(&self.columns)
    }

    /// Ids of the selectable rows on this page.
    pub fn page_ids(&self) -> Vec<crate::selection::RowId> {
        self.rows.iter().filter_map(TableRow::id).collect()
    }
}

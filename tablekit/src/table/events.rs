//! Event dispatch for the data table.

use log::debug;

use crate::events::{EventResult, Interaction};
use crate::selection::SelectionEngine;
use crate::sort::SortEngine;
use crate::visibility::VisibilityEngine;

use super::column::TableRow;
use super::state::RenderState;
use super::DataTable;

/// An interaction with the rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// Header of the column with this id was clicked.
    HeaderClick(String),
    /// The select-all checkbox was set.
    HeaderCheckbox(bool),
    /// A row checkbox was set.
    RowCheckbox { row: usize, checked: bool },
    /// A row body was clicked.
    RowClick(usize),
    /// The pointer entered a row, or left the body.
    RowHover(Option<usize>),
    PageChange(u32),
    PageSizeChange(u32),
    /// A keystroke in the search box; carries the whole new value.
    SearchInput(String),
    ToggleFilters,
    ToggleColumnMenu,
    ColumnVisibility { column: String, visible: bool },
    BulkAction(String),
    EmptyAction,
}

impl<T: TableRow> DataTable<T> {
    /// Handle an event.
    ///
    /// Events aimed at absent features or out-of-range targets are ignored.
    pub fn dispatch(&mut self, event: TableEvent) -> EventResult {
        match event {
            TableEvent::HeaderClick(column_id) => self.on_header_click(&column_id),
            TableEvent::HeaderCheckbox(checked) => self.on_header_checkbox(checked),
            TableEvent::RowCheckbox { row, checked } => self.on_row_checkbox(row, checked),
            TableEvent::RowClick(row) => {
                let mut interaction = Interaction::new();
                self.bubble_row_click(row, &mut interaction)
            }
            TableEvent::RowHover(row) => self.on_row_hover(row),
            TableEvent::PageChange(page) => match &self.props.pagination {
                Some(pagination) if self.state() == RenderState::Populated => {
                    pagination.go_to(page).into()
                }
                _ => EventResult::Ignored,
            },
            TableEvent::PageSizeChange(size) => match &self.props.pagination {
                Some(pagination) if self.state() == RenderState::Populated => {
                    pagination.set_items_per_page(size).into()
                }
                _ => EventResult::Ignored,
            },
            TableEvent::SearchInput(value) => match &mut self.search {
                Some(search) => {
                    search.input(value);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            TableEvent::ToggleFilters => match &self.props.callbacks.on_toggle_filters {
                Some(on_toggle) => {
                    on_toggle(!self.props.toolbar.show_filters);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            TableEvent::ToggleColumnMenu => {
                if !self.column_picker_enabled() {
                    return EventResult::Ignored;
                }
                self.column_menu_open = !self.column_menu_open;
                EventResult::Consumed
            }
            TableEvent::ColumnVisibility { column, visible } => {
                if !self.column_picker_enabled() {
                    return EventResult::Ignored;
                }
                VisibilityEngine::new(
                    &self.props.columns,
                    &self.props.visible_columns,
                    self.props.callbacks.on_visible_columns_change.as_ref(),
                )
                .set_visible(&column, visible)
                .is_some()
                .into()
            }
            TableEvent::BulkAction(value) => match &self.props.callbacks.on_bulk_action {
                Some(on_action) => {
                    debug!("Bulk action '{}'", value);
                    on_action(value);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            TableEvent::EmptyAction => match &self.props.callbacks.on_empty_action {
                Some(on_action) if self.state() == RenderState::Empty => {
                    on_action(());
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
        }
    }

    /// Handle a click on an element of the last render, by its scoped element
    /// id (`<table_id>-sort-name`). Ids of other tables are ignored.
    ///
    /// Checkboxes toggle relative to their rendered state.
    pub fn click(&mut self, element_id: &str) -> EventResult {
        let Some(element_id) = element_id
            .strip_prefix(self.props.table_id.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
        else {
            return EventResult::Ignored;
        };
        let event = match element_id {
            "select-all" => {
                let Some(selection) = &self.props.selection else {
                    return EventResult::Ignored;
                };
                let state = selection.header_state(&self.props.page_ids());
                TableEvent::HeaderCheckbox(!state.checked)
            }
            "filters-toggle" => TableEvent::ToggleFilters,
            "columns-toggle" => TableEvent::ToggleColumnMenu,
            "empty-action" => TableEvent::EmptyAction,
            "page-prev" | "page-next" => {
                let Some(pagination) = &self.props.pagination else {
                    return EventResult::Ignored;
                };
                let current = pagination.current_page;
                if element_id == "page-prev" {
                    if current <= 1 {
                        return EventResult::Ignored;
                    }
                    TableEvent::PageChange(current - 1)
                } else {
                    if current >= pagination.total_pages {
                        return EventResult::Ignored;
                    }
                    TableEvent::PageChange(current + 1)
                }
            }
            id => {
                if let Some(column) = id.strip_prefix("sort-") {
                    TableEvent::HeaderClick(column.to_string())
                } else if let Some(column) = id.strip_prefix("column-toggle-") {
                    let visible = self.props.visible_columns.contains(column);
                    TableEvent::ColumnVisibility {
                        column: column.to_string(),
                        visible: !visible,
                    }
                } else if let Some(value) = id.strip_prefix("bulk-") {
                    TableEvent::BulkAction(value.to_string())
                } else if let Some(page) = id.strip_prefix("page-").and_then(|p| p.parse().ok()) {
                    TableEvent::PageChange(page)
                } else if let Some(rest) = id.strip_prefix("row-") {
                    match rest.strip_suffix("-select") {
                        Some(row) => {
                            let Ok(row) = row.parse::<usize>() else {
                                return EventResult::Ignored;
                            };
                            TableEvent::RowCheckbox {
                                row,
                                checked: !self.is_row_selected(row),
                            }
                        }
                        None => match rest.parse() {
                            Ok(row) => TableEvent::RowClick(row),
                            Err(_) => return EventResult::Ignored,
                        },
                    }
                } else {
                    return EventResult::Ignored;
                }
            }
        };
        self.dispatch(event)
    }

    fn is_row_selected(&self, row: usize) -> bool {
        let id = self.props.rows.get(row).and_then(TableRow::id);
        match (&self.props.selection, id) {
            (Some(selection), Some(id)) => selection.contains(&id),
            _ => false,
        }
    }

    fn on_header_click(&self, column_id: &str) -> EventResult {
        if self.state() == RenderState::Loading {
            return EventResult::Ignored;
        }
        let Some(column) = self
            .props
            .effective_columns()
            .into_iter()
            .find(|c| c.id() == column_id)
        else {
            return EventResult::Ignored;
        };
        SortEngine::new(
            self.props.sort.as_ref(),
            self.props.callbacks.on_sort_change.as_ref(),
        )
        .toggle(column)
        .is_some()
        .into()
    }

    fn on_header_checkbox(&self, checked: bool) -> EventResult {
        if self.state() != RenderState::Populated || !self.props.selection_enabled() {
            return EventResult::Ignored;
        }
        let Some(selection) = &self.props.selection else {
            return EventResult::Ignored;
        };
        SelectionEngine::new(
            selection,
            self.props.page_ids(),
            self.props.callbacks.on_selection_change.as_ref(),
        )
        .toggle_select_all_on_page(checked)
        .is_some()
        .into()
    }

    /// The checkbox consumes the click: neither the caller's row `on_click`
    /// nor `on_row_click` runs for it.
    fn on_row_checkbox(&mut self, row: usize, checked: bool) -> EventResult {
        if self.state() != RenderState::Populated || !self.props.selection_enabled() {
            return EventResult::Ignored;
        }
        let (Some(selection), Some(id)) = (
            &self.props.selection,
            self.props.rows.get(row).and_then(TableRow::id),
        ) else {
            return EventResult::Ignored;
        };

        SelectionEngine::new(
            selection,
            self.props.page_ids(),
            self.props.callbacks.on_selection_change.as_ref(),
        )
        .toggle_row(&id, checked)
        .is_some()
        .into()
    }

    /// Row click: the caller's handler first, then the engine default unless
    /// the caller marked the interaction handled.
    fn bubble_row_click(&self, row: usize, interaction: &mut Interaction) -> EventResult {
        if self.state() != RenderState::Populated {
            return EventResult::Ignored;
        }
        let Some(item) = self.props.rows.get(row) else {
            return EventResult::Ignored;
        };

        let mut handled = false;
        if let Some(on_click) = self.row_attrs(item, row).on_click {
            on_click(item, row, interaction);
            handled = true;
        }
        if interaction.is_handled() {
            return EventResult::Consumed;
        }
        if let Some(on_row_click) = &self.props.callbacks.on_row_click {
            on_row_click(item, row);
            handled = true;
        }
        handled.into()
    }

    fn on_row_hover(&mut self, row: Option<usize>) -> EventResult {
        let Some(row) = row else {
            return self.set_hovered(None);
        };
        if self.state() != RenderState::Populated {
            return EventResult::Ignored;
        }
        let Some(item) = self.props.rows.get(row) else {
            return EventResult::Ignored;
        };
        let mut interaction = Interaction::new();
        if let Some(on_hover) = self.row_attrs(item, row).on_hover {
            on_hover(item, row, &mut interaction);
        }
        if interaction.is_handled() {
            return EventResult::Consumed;
        }
        self.set_hovered(Some(row))
    }

    fn set_hovered(&mut self, row: Option<usize>) -> EventResult {
        if self.hovered_row == row {
            return EventResult::Ignored;
        }
        self.hovered_row = row;
        EventResult::Consumed
    }
}

//! Rendering for the data table.

use crate::node::{Alignment, ButtonVariant, Layout, Node, Role, Tone};
use crate::selection::{RowId, SelectionEngine};
use crate::sort::{SortDirection, SortEngine};
use crate::toolbar::{ColumnMenu, Toolbar};

use super::cell::{CellContext, render_cell};
use super::column::{Column, TableRow};
use super::state::{RenderState, RowAttrs};
use super::DataTable;

impl<T: TableRow> DataTable<T> {
    /// Render the table for the current props.
    ///
    /// The toolbar is always composed; the body is the loading skeleton, the
    /// empty state or the populated grid, in that priority. Element ids below
    /// the root are scoped as `<table_id>-<id>`.
    pub fn render(&self) -> Node {
        let mut children = vec![self.render_toolbar()];

        if self.props.toolbar.show_filters
            && let Some(panel) = &self.props.toolbar.filter_panel
        {
            children.push(Node::column_with(
                Layout::role(Role::FilterPanel).id("filter-panel"),
                vec![panel.clone()],
            ));
        }

        match self.state() {
            RenderState::Loading => children.push(self.render_skeleton()),
            RenderState::Empty => {
                children.push(self.render_header());
                children.push(self.render_empty());
            }
            RenderState::Populated => {
                children.push(self.render_header());
                children.push(self.render_body());
                if let Some(pagination) = &self.props.pagination {
                    children.push(pagination.render(
                        self.config.max_visible_pages,
                        &self.config.page_size_options,
                    ));
                }
            }
        }

        let table_id = &self.props.table_id;
        Node::column_with(
            Layout::role(Role::Table).id(table_id.clone()),
            children
                .into_iter()
                .map(|child| child.scoped(table_id))
                .collect(),
        )
    }

    fn render_toolbar(&self) -> Node {
        let callbacks = &self.props.callbacks;
        let column_menu = self.column_picker_enabled().then(|| ColumnMenu {
            open: self.column_menu_open,
            entries: self
                .props
                .visible_columns
                .picker_entries(&self.props.columns),
        });
        Toolbar {
            props: &self.props.toolbar,
            search: self.search_value(),
            placeholder: &self.config.search_placeholder,
            filter_toggle: callbacks.on_toggle_filters.is_some(),
            selected_count: self.props.selection.as_ref().map_or(0, |s| s.len()),
            bulk_enabled: callbacks.on_bulk_action.is_some(),
            column_menu,
        }
        .render()
    }

    fn render_skeleton(&self) -> Node {
        let mut columns = self.props.effective_columns().len();
        if self.props.selection_enabled() {
            columns += 1;
        }
        let rows = (0..self.config.skeleton_rows)
            .map(|_| Node::row((0..columns).map(|_| Node::Skeleton).collect()))
            .collect();
        Node::column_with(
            Layout::role(Role::Skeleton).id("skeleton"),
            rows,
        )
    }

    fn render_header(&self) -> Node {
        let mut cells = Vec::new();

        if self.props.selection_enabled()
            && let Some(selection) = &self.props.selection
        {
            let state = SelectionEngine::new(selection, self.props.page_ids(), None).header_state();
            cells.push(Node::row_with(
                Layout::role(Role::HeaderCell).class("select-column"),
                vec![Node::Checkbox {
                    id: "select-all".to_string(),
                    label: None,
                    checked: state.checked,
                    indeterminate: state.indeterminate,
                }],
            ));
        }

        let sort = SortEngine::new(
            self.props.sort.as_ref(),
            self.props.callbacks.on_sort_change.as_ref(),
        );
        for column in self.props.effective_columns() {
            let mut layout = column_layout(column, Role::HeaderCell)
                .id(format!("header-{}", column.id()));
            let direction = sort.direction_for(column);
            let content = if column.sort_key().is_some()
                && self.props.callbacks.on_sort_change.is_some()
            {
                layout.attrs.push((
                    "aria-sort".to_string(),
                    match direction {
                        Some(SortDirection::Asc) => "ascending",
                        Some(SortDirection::Desc) => "descending",
                        None => "none",
                    }
                    .to_string(),
                ));
                let mut content = vec![Node::Button {
                    id: format!("sort-{}", column.id()),
                    label: column.header.clone(),
                    variant: ButtonVariant::Ghost,
                    icon: Some(
                        match direction {
                            Some(SortDirection::Asc) => "arrow-up",
                            Some(SortDirection::Desc) => "arrow-down",
                            None => "arrow-up-down",
                        }
                        .to_string(),
                    ),
                    disabled: false,
                    pressed: direction.is_some(),
                }];
                if let Some(direction) = direction {
                    content.push(Node::text_toned(direction.indicator(), Tone::Muted));
                }
                content
            } else {
                vec![Node::text_toned(column.header.clone(), Tone::Strong)]
            };
            cells.push(Node::row_with(layout, content));
        }

        Node::row_with(Layout::role(Role::Header).id("header"), cells)
    }

    fn render_empty(&self) -> Node {
        let message = self
            .props
            .empty_state
            .message
            .clone()
            .unwrap_or_else(|| self.config.empty_message.clone());
        let mut children = vec![Node::text_toned(message, Tone::Muted)];
        if self.props.callbacks.on_empty_action.is_some()
            && let Some(label) = &self.props.empty_state.action_label
        {
            children.push(Node::Button {
                id: "empty-action".to_string(),
                label: label.clone(),
                variant: ButtonVariant::Primary,
                icon: None,
                disabled: false,
                pressed: false,
            });
        }
        Node::column_with(
            Layout::role(Role::EmptyState)
                .id("empty-state")
                .align(Alignment::Center),
            children,
        )
    }

    fn render_body(&self) -> Node {
        let cx = self.cell_context();
        let columns = self.props.effective_columns();
        let rows = self
            .props
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.render_row(row, index, &columns, &cx))
            .collect();
        Node::column_with(Layout::role(Role::Body).id("body"), rows)
    }

    fn render_row(&self, row: &T, index: usize, columns: &[&Column<T>], cx: &CellContext) -> Node {
        let id = row.id();
        let selected = match (&self.props.selection, &id) {
            (Some(selection), Some(id)) => selection.contains(id),
            _ => false,
        };
        let hovered = self.hovered_row == Some(index);
        let caller = self.row_attrs(row, index);

        let mut layout = Layout::role(Role::BodyRow).id(format!("row-{}", index)).class("row");
        if selected {
            layout = layout.class("row-selected");
        }
        if hovered {
            layout = layout.class("row-hovered");
        }
        if let Some(class) = &caller.class_name {
            layout = layout.class(class);
        }
        layout.selected = selected;
        layout.hovered = hovered;
        if let Some(id) = &id {
            layout.attrs.push(("data-row-id".to_string(), id.to_string()));
        }
        layout.attrs.extend(caller.attrs);

        let mut cells = Vec::with_capacity(columns.len() + 1);
        if self.props.selection_enabled() {
            cells.push(self.render_row_checkbox(index, id.as_ref(), selected));
        }
        for &column in columns {
            cells.push(Node::row_with(
                column_layout(column, Role::Cell).id(format!("cell-{}-{}", index, column.id())),
                vec![render_cell(column, row, index, cx)],
            ));
        }
        Node::row_with(layout, cells)
    }

    fn render_row_checkbox(&self, index: usize, id: Option<&RowId>, selected: bool) -> Node {
        let content = match id {
            Some(_) => Node::Checkbox {
                id: format!("row-{}-select", index),
                label: None,
                checked: selected,
                indeterminate: false,
            },
            None => Node::Empty,
        };
        Node::row_with(
            Layout::role(Role::Cell).class("select-column"),
            vec![content],
        )
    }

    pub(super) fn row_attrs(&self, row: &T, index: usize) -> RowAttrs<T> {
        match &self.props.row_attrs {
            Some(f) => f(row, index),
            None => RowAttrs::default(),
        }
    }
}

fn column_layout<T>(column: &Column<T>, role: Role) -> Layout {
    let mut layout = Layout::role(role).align(column.align);
    if let Some(class) = &column.class_name {
        layout = layout.class(class);
    }
    layout.width = column.width.clone();
    layout.min_width = column.min_width.clone();
    layout
}

//! Toolbar above the table: search box, filter toggle, bulk actions and the
//! column-visibility menu.
//!
//! Each part is only composed when the corresponding callback exists.

use serde::{Deserialize, Serialize};

use crate::node::{ButtonVariant, Layout, Node, Role, Tone};
use crate::visibility::PickerEntry;

/// An action applied to the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAction {
    pub label: String,
    /// Passed to `on_bulk_action` unchanged.
    pub value: String,
    #[serde(default)]
    pub variant: ButtonVariant,
    #[serde(default)]
    pub icon: Option<String>,
}

impl BulkAction {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            variant: ButtonVariant::Default,
            icon: None,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Element id of the action button.
    pub fn element_id(&self) -> String {
        format!("bulk-{}", self.value)
    }
}

/// Host-controlled toolbar values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolbarProps {
    pub search_value: String,
    /// Falls back to the configured placeholder.
    pub search_placeholder: Option<String>,
    pub show_filters: bool,
    pub active_filter_count: usize,
    /// Shown below the toolbar while filters are shown.
    pub filter_panel: Option<Node>,
    pub bulk_actions: Vec<BulkAction>,
    /// Show the column-visibility menu.
    pub column_picker: bool,
}

/// Column menu contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMenu {
    pub open: bool,
    pub entries: Vec<PickerEntry>,
}

/// Inputs for one toolbar render.
#[derive(Debug, Clone)]
pub struct Toolbar<'a> {
    pub props: &'a ToolbarProps,
    /// Local search echo; `None` when search is disabled.
    pub search: Option<&'a str>,
    pub placeholder: &'a str,
    pub filter_toggle: bool,
    /// Bulk actions are offered only while this is non-zero.
    pub selected_count: usize,
    pub bulk_enabled: bool,
    pub column_menu: Option<ColumnMenu>,
}

impl Toolbar<'_> {
    /// Compose the toolbar. Yields [`Node::Empty`] when no part is enabled.
    pub fn render(&self) -> Node {
        let mut children = Vec::new();

        if let Some(value) = self.search {
            let placeholder = self
                .props
                .search_placeholder
                .as_deref()
                .unwrap_or(self.placeholder);
            children.push(Node::row_with(
                Layout::role(Role::SearchBox),
                vec![Node::Input {
                    id: "search".to_string(),
                    value: value.to_string(),
                    placeholder: placeholder.to_string(),
                }],
            ));
        }

        if self.filter_toggle {
            let label = match self.props.active_filter_count {
                0 => "Filters".to_string(),
                n => format!("Filters ({})", n),
            };
            children.push(Node::Button {
                id: "filters-toggle".to_string(),
                label,
                variant: ButtonVariant::Outline,
                icon: Some("filter".to_string()),
                disabled: false,
                pressed: self.props.show_filters,
            });
        }

        if self.bulk_enabled && self.selected_count > 0 && !self.props.bulk_actions.is_empty() {
            children.push(self.render_bulk_actions());
        }

        if let Some(menu) = &self.column_menu {
            children.push(render_column_menu(menu));
        }

        if children.is_empty() {
            return Node::Empty;
        }
        Node::row_with(Layout::role(Role::Toolbar).id("toolbar"), children)
    }

    fn render_bulk_actions(&self) -> Node {
        let mut children = vec![Node::text_toned(
            format!("{} selected", self.selected_count),
            Tone::Muted,
        )];
        children.extend(self.props.bulk_actions.iter().map(|action| Node::Button {
            id: action.element_id(),
            label: action.label.clone(),
            variant: action.variant,
            icon: action.icon.clone(),
            disabled: false,
            pressed: false,
        }));
        Node::row_with(Layout::role(Role::BulkActions).id("bulk-actions"), children)
    }
}

fn render_column_menu(menu: &ColumnMenu) -> Node {
    let mut children = vec![Node::Button {
        id: "columns-toggle".to_string(),
        label: "Columns".to_string(),
        variant: ButtonVariant::Outline,
        icon: Some("columns".to_string()),
        disabled: false,
        pressed: menu.open,
    }];
    if menu.open {
        children.push(Node::column_with(
            Layout::role(Role::ColumnMenu).id("column-menu"),
            menu.entries
                .iter()
                .map(|entry| Node::Checkbox {
                    id: format!("column-toggle-{}", entry.id),
                    label: Some(entry.header.clone()),
                    checked: entry.checked,
                    indeterminate: false,
                })
                .collect(),
        ));
    }
    Node::column(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolbar(props: &ToolbarProps) -> Toolbar<'_> {
        Toolbar {
            props,
            search: None,
            placeholder: "Search...",
            filter_toggle: false,
            selected_count: 0,
            bulk_enabled: false,
            column_menu: None,
        }
    }

    #[test]
    fn test_nothing_enabled_renders_empty() {
        let props = ToolbarProps::default();
        assert!(toolbar(&props).render().is_empty());
    }

    #[test]
    fn test_filter_label_counts_active_filters() {
        let props = ToolbarProps {
            active_filter_count: 2,
            show_filters: true,
            ..Default::default()
        };
        let node = Toolbar {
            filter_toggle: true,
            ..toolbar(&props)
        }
        .render();
        match node.find_by_id("filters-toggle") {
            Some(Node::Button { label, pressed, .. }) => {
                assert_eq!(label, "Filters (2)");
                assert!(*pressed);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bulk_actions_need_a_selection() {
        let props = ToolbarProps {
            bulk_actions: vec![BulkAction::new("Delete", "delete")],
            ..Default::default()
        };
        let idle = Toolbar {
            bulk_enabled: true,
            search: Some(""),
            ..toolbar(&props)
        };
        assert!(idle.render().find_by_id("bulk-delete").is_none());

        let active = Toolbar {
            selected_count: 3,
            ..idle
        };
        let node = active.render();
        assert!(node.find_by_id("bulk-delete").is_some());
        assert!(node.text_content().contains("3 selected"));
    }
}

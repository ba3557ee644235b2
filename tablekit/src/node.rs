//! View tree produced by the table engine.
//!
//! The engine is presentation-agnostic: it describes what to show as a tree
//! of [`Node`]s and the host maps that tree onto its own widgets. Parts of the
//! table carry a [`Role`] and, when interactive, a stable id.

/// Horizontal alignment for cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Semantic part of the table a container represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Table,
    Toolbar,
    SearchBox,
    FilterPanel,
    BulkActions,
    ColumnMenu,
    Header,
    HeaderCell,
    Body,
    BodyRow,
    Cell,
    EmptyState,
    Skeleton,
    Pagination,
    PageWindow,
    FloatingAction,
}

/// Text emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Muted,
    Strong,
    Error,
}

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Primary,
    Outline,
    Ghost,
    Destructive,
}

/// Container properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Stable element id.
    pub id: Option<String>,
    /// Semantic role.
    pub role: Option<Role>,
    /// Space-separated class names.
    pub class_name: Option<String>,
    /// Content alignment.
    pub align: Alignment,
    /// Width as a css length.
    pub width: Option<String>,
    /// Minimum width as a css length.
    pub min_width: Option<String>,
    /// Row is selected.
    pub selected: bool,
    /// Row is hovered.
    pub hovered: bool,
    /// Extra caller-supplied attributes.
    pub attrs: Vec<(String, String)>,
}

impl Layout {
    /// Layout carrying a role.
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    /// Set the element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a class name.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref().trim();
        if class.is_empty() {
            return self;
        }
        self.class_name = Some(match self.class_name.take() {
            Some(existing) => format!("{} {}", existing, class),
            None => class.to_string(),
        });
        self
    }

    /// Set the alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

/// A node in the view tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    /// Renders nothing.
    #[default]
    Empty,
    /// Text content.
    Text { content: String, tone: Tone },
    /// Horizontal container.
    Row { children: Vec<Node>, layout: Layout },
    /// Vertical container.
    Column { children: Vec<Node>, layout: Layout },
    /// Clickable button.
    Button {
        id: String,
        label: String,
        variant: ButtonVariant,
        icon: Option<String>,
        disabled: bool,
        pressed: bool,
    },
    /// Checkbox with tri-state support.
    Checkbox {
        id: String,
        label: Option<String>,
        checked: bool,
        indeterminate: bool,
    },
    /// Text input.
    Input {
        id: String,
        value: String,
        placeholder: String,
    },
    /// Drop-down selector.
    Select {
        id: String,
        options: Vec<String>,
        selected: Option<usize>,
    },
    /// Loading placeholder block.
    Skeleton,
}

impl Node {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            tone: Tone::Normal,
        }
    }

    /// Create a text node with a tone.
    pub fn text_toned(content: impl Into<String>, tone: Tone) -> Self {
        Self::Text {
            content: content.into(),
            tone,
        }
    }

    /// Create a row with default layout.
    pub fn row(children: Vec<Node>) -> Self {
        Self::Row {
            children,
            layout: Layout::default(),
        }
    }

    /// Create a row with layout.
    pub fn row_with(layout: Layout, children: Vec<Node>) -> Self {
        Self::Row { children, layout }
    }

    /// Create a column with default layout.
    pub fn column(children: Vec<Node>) -> Self {
        Self::Column {
            children,
            layout: Layout::default(),
        }
    }

    /// Create a column with layout.
    pub fn column_with(layout: Layout, children: Vec<Node>) -> Self {
        Self::Column { children, layout }
    }

    /// Create an enabled default button.
    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Button {
            id: id.into(),
            label: label.into(),
            variant: ButtonVariant::Default,
            icon: None,
            disabled: false,
            pressed: false,
        }
    }

    /// Prefix every element id in this subtree with `<scope>-`.
    pub fn scoped(mut self, scope: &str) -> Node {
        self.scope_ids(scope);
        self
    }

    fn scope_ids(&mut self, scope: &str) {
        match self {
            Node::Row { children, layout } | Node::Column { children, layout } => {
                if let Some(id) = &mut layout.id {
                    *id = format!("{}-{}", scope, id);
                }
                for child in children {
                    child.scope_ids(scope);
                }
            }
            Node::Button { id, .. }
            | Node::Checkbox { id, .. }
            | Node::Input { id, .. }
            | Node::Select { id, .. } => *id = format!("{}-{}", scope, id),
            _ => {}
        }
    }

    /// Check if this node renders nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Child nodes of a container.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Row { children, .. } | Node::Column { children, .. } => children,
            _ => &[],
        }
    }

    /// Layout of a container.
    pub fn layout(&self) -> Option<&Layout> {
        match self {
            Node::Row { layout, .. } | Node::Column { layout, .. } => Some(layout),
            _ => None,
        }
    }

    /// Element id, for containers and interactive nodes.
    pub fn id(&self) -> Option<&str> {
        match self {
            Node::Row { layout, .. } | Node::Column { layout, .. } => layout.id.as_deref(),
            Node::Button { id, .. }
            | Node::Checkbox { id, .. }
            | Node::Input { id, .. }
            | Node::Select { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Role of a container.
    pub fn role(&self) -> Option<Role> {
        self.layout().and_then(|l| l.role)
    }

    /// All nodes in pre-order, starting with `self`.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in node.children().iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Find the first node with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.descendants().into_iter().find(|n| n.id() == Some(id))
    }

    /// Find the first container with the given role.
    pub fn find_role(&self, role: Role) -> Option<&Node> {
        self.descendants()
            .into_iter()
            .find(|n| n.role() == Some(role))
    }

    /// Find every container with the given role.
    pub fn find_all_role(&self, role: Role) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|n| n.role() == Some(role))
            .collect()
    }

    /// Concatenated visible text of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in self.descendants() {
            let piece = match node {
                Node::Text { content, .. } => content.as_str(),
                Node::Button { label, .. } => label.as_str(),
                Node::Checkbox {
                    label: Some(label), ..
                } => label.as_str(),
                _ => continue,
            };
            if !out.is_empty() && !piece.is_empty() {
                out.push(' ');
            }
            out.push_str(piece);
        }
        out
    }

    /// Render the tree as plain text, one line per vertical child.
    pub fn to_plain_text(&self) -> String {
        match self {
            Node::Empty => String::new(),
            Node::Text { content, .. } => content.clone(),
            Node::Row { children, .. } => children
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| c.to_plain_text().replace('\n', " "))
                .collect::<Vec<_>>()
                .join("  "),
            Node::Column { children, .. } => children
                .iter()
                .filter(|c| !c.is_empty())
                .map(Node::to_plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Node::Button {
                label, disabled, ..
            } => {
                if *disabled {
                    format!("({})", label)
                } else {
                    format!("[{}]", label)
                }
            }
            Node::Checkbox {
                label,
                checked,
                indeterminate,
                ..
            } => {
                let mark = if *indeterminate {
                    "[-]"
                } else if *checked {
                    "[x]"
                } else {
                    "[ ]"
                };
                match label {
                    Some(label) => format!("{} {}", mark, label),
                    None => mark.to_string(),
                }
            }
            Node::Input {
                value, placeholder, ..
            } => {
                if value.is_empty() {
                    format!("<{}>", placeholder)
                } else {
                    format!("<{}>", value)
                }
            }
            Node::Select {
                options, selected, ..
            } => {
                let current = selected
                    .and_then(|i| options.get(i))
                    .map(String::as_str)
                    .unwrap_or("");
                format!("{} ▾", current)
            }
            Node::Skeleton => "░░░░".to_string(),
        }
    }
}

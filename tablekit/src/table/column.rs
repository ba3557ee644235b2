//! Column definitions and the row trait.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::node::{Alignment, Node};
use crate::selection::RowId;

use super::cell::CellResult;

/// A raw field value read from a row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Check if the value is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Plain display form.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => crate::format::PLACEHOLDER.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.to_rfc3339(),
        }
    }

    /// Text used for free-text search.
    pub fn search_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s.to_lowercase()),
            other => Some(other.display().to_lowercase()),
        }
    }

    /// Ascending order; nulls sort last, mismatched kinds compare as text.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Greater,
            (_, Null) => Ordering::Less,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Number(a), Number(b)) => a.total_cmp(b),
            (Integer(a), Number(b)) => (*a as f64).total_cmp(b),
            (Number(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (Bool(a), Bool(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (a, b) => a.display().cmp(&b.display()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::DateTime(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Trait for items displayed as table rows.
///
/// # Example
///
/// ```ignore
/// impl TableRow for Currency {
///     fn id(&self) -> Option<RowId> {
///         Some(self.id.into())
///     }
///
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "code" => self.code.as_str().into(),
///             "rate" => self.rate.into(),
///             _ => CellValue::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Row identity. Rows without one cannot be selected.
    fn id(&self) -> Option<RowId>;

    /// Read a named field. Unknown keys yield [`CellValue::Null`].
    fn field(&self, key: &str) -> CellValue;
}

/// How a field value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    #[default]
    Text,
    DateTime,
    Number,
    Boolean,
}

/// Computes a cell from the whole row.
pub type ComputeFn<T> = Arc<dyn Fn(&T, usize) -> CellResult + Send + Sync>;

/// Renders a field value.
pub type RenderFn<T> = Arc<dyn Fn(&CellValue, &T, usize) -> CellResult + Send + Sync>;

/// Where a column's content comes from.
pub enum Accessor<T> {
    /// A named field, read through [`TableRow::field`].
    Field(String),
    /// A function of the row. Never sortable.
    Compute(ComputeFn<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(key) => Accessor::Field(key.clone()),
            Accessor::Compute(f) => Accessor::Compute(Arc::clone(f)),
        }
    }
}

impl<T> std::fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Field(key) => f.debug_tuple("Field").field(key).finish(),
            Accessor::Compute(_) => f.write_str("Compute(<fn>)"),
        }
    }
}

/// A table column definition.
pub struct Column<T> {
    /// Empty until assigned; see [`assign_default_ids`].
    id: String,
    /// Header text.
    pub header: String,
    pub accessor: Accessor<T>,
    /// Custom renderer for field columns.
    pub render: Option<RenderFn<T>>,
    pub class_name: Option<String>,
    pub sortable: bool,
    /// Non-hideable columns are always rendered.
    pub hideable: bool,
    /// Css length.
    pub width: Option<String>,
    /// Css length.
    pub min_width: Option<String>,
    pub align: Alignment,
    pub kind: ColumnKind,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            render: self.render.clone(),
            class_name: self.class_name.clone(),
            sortable: self.sortable,
            hideable: self.hideable,
            width: self.width.clone(),
            min_width: self.min_width.clone(),
            align: self.align,
            kind: self.kind,
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> Column<T> {
    fn with_accessor(id: String, header: String, accessor: Accessor<T>) -> Self {
        Self {
            id,
            header,
            accessor,
            render: None,
            class_name: None,
            sortable: false,
            hideable: true,
            width: None,
            min_width: None,
            align: Alignment::Left,
            kind: ColumnKind::Text,
        }
    }

    /// Column reading a named field; its id is the field key.
    pub fn field(key: impl Into<String>, header: impl Into<String>) -> Self {
        let key = key.into();
        Self::with_accessor(key.clone(), header.into(), Accessor::Field(key))
    }

    /// Column computed from the whole row.
    pub fn computed<F>(header: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T, usize) -> CellResult + Send + Sync + 'static,
    {
        Self::with_accessor(String::new(), header.into(), Accessor::Compute(Arc::new(f)))
    }

    /// Column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set an explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Make the column sortable. Has no effect on computed columns.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Keep the column visible regardless of the visible set.
    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set the display kind.
    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the width.
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Set the minimum width.
    pub fn min_width(mut self, min_width: impl Into<String>) -> Self {
        self.min_width = Some(min_width.into());
        self
    }

    /// Add a class name to every cell of this column.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Render field values with `f`.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &T, usize) -> CellResult + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// Field key, for field columns.
    pub fn field_key(&self) -> Option<&str> {
        match &self.accessor {
            Accessor::Field(key) => Some(key),
            Accessor::Compute(_) => None,
        }
    }

    /// Field key used for sorting; `None` unless the column participates in sort.
    pub fn sort_key(&self) -> Option<&str> {
        if self.sortable {
            self.field_key()
        } else {
            None
        }
    }
}

/// Give every column without an id the id `column-<index>`.
pub fn assign_default_ids<T>(columns: &mut [Column<T>]) {
    for (index, column) in columns.iter_mut().enumerate() {
        if column.id.is_empty() {
            column.id = format!("column-{}", index);
        }
    }
}

/// Convenience for computed columns that cannot fail.
pub fn ok_text(content: impl Into<String>) -> CellResult {
    Ok(Node::text(content))
}

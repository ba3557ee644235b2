//! Cell rendering boundary.
//!
//! A cell either renders or yields a [`RenderFault`]. Faults, including
//! panics raised by caller-supplied closures, stop at the cell: the cell shows
//! an error placeholder and the rest of the row renders normally.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Locale, Utc};
use log::warn;
use thiserror::Error;

use crate::format::{PLACEHOLDER, format_date_time};
use crate::node::{Layout, Node, Tone};

use super::column::{Accessor, CellValue, Column, ColumnKind, TableRow};

/// Placeholder shown in place of a faulted cell.
pub const ERROR_PLACEHOLDER: &str = "Error";

/// A cell that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderFault {
    #[error("renderer panicked: {0}")]
    Panic(String),
    #[error("{0}")]
    Failed(String),
}

impl RenderFault {
    /// Fault with a message.
    pub fn new(message: impl Into<String>) -> Self {
        RenderFault::Failed(message.into())
    }
}

/// Result of rendering one cell.
pub type CellResult = Result<Node, RenderFault>;

/// Inputs the default renderers need.
#[derive(Debug, Clone, Copy)]
pub struct CellContext {
    pub now: DateTime<Utc>,
    pub locale: Locale,
}

/// Extract a human-readable message from a panic payload.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Render a cell, reporting faults as data.
pub fn try_render_cell<T: TableRow>(
    column: &Column<T>,
    row: &T,
    index: usize,
    cx: &CellContext,
) -> CellResult {
    match panic::catch_unwind(AssertUnwindSafe(|| render_content(column, row, index, cx))) {
        Ok(result) => result,
        Err(payload) => Err(RenderFault::Panic(extract_panic_message(&*payload))),
    }
}

/// Render a cell, replacing faults with the error placeholder.
pub fn render_cell<T: TableRow>(
    column: &Column<T>,
    row: &T,
    index: usize,
    cx: &CellContext,
) -> Node {
    match try_render_cell(column, row, index, cx) {
        Ok(node) => node,
        Err(fault) => {
            warn!(
                "Cell '{}' in row {} failed to render: {}",
                column.id(),
                index,
                fault
            );
            Node::text_toned(ERROR_PLACEHOLDER, Tone::Error)
        }
    }
}

fn render_content<T: TableRow>(
    column: &Column<T>,
    row: &T,
    index: usize,
    cx: &CellContext,
) -> CellResult {
    match &column.accessor {
        Accessor::Compute(compute) => compute(row, index),
        Accessor::Field(key) => {
            let value = row.field(key);
            match &column.render {
                Some(render) => render(&value, row, index),
                None => Ok(default_cell(&value, column.kind, cx)),
            }
        }
    }
}

/// Default display of a field value for a column kind.
pub fn default_cell(value: &CellValue, kind: ColumnKind, cx: &CellContext) -> Node {
    if value.is_null() {
        return Node::text_toned(PLACEHOLDER, Tone::Muted);
    }
    match kind {
        ColumnKind::DateTime => {
            let formatted = match value {
                CellValue::DateTime(dt) => format_date_time(*dt, cx.now, cx.locale),
                CellValue::Text(s) => format_date_time(s, cx.now, cx.locale),
                CellValue::Integer(ms) => format_date_time(*ms, cx.now, cx.locale),
                _ => None,
            };
            match formatted {
                Some(f) => {
                    let mut layout = Layout::default().class("datetime");
                    layout.attrs.push(("datetime".to_string(), f.raw));
                    Node::row_with(layout, vec![Node::text(f.formatted)])
                }
                None => Node::text_toned(PLACEHOLDER, Tone::Muted),
            }
        }
        ColumnKind::Boolean => match value {
            CellValue::Bool(true) => Node::text("Yes"),
            CellValue::Bool(false) => Node::text_toned("No", Tone::Muted),
            other => Node::text(other.display()),
        },
        ColumnKind::Number | ColumnKind::Text => Node::text(value.display()),
    }
}

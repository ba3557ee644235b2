//! Column visibility.
//!
//! The absence of a visible set means "every column visible"; an empty set
//! hides every hideable column. Columns declared non-hideable are rendered
//! whatever the set says.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::events::Callback;
use crate::table::{Column, TableRow};

/// Consumer-supplied set of visible column ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibleColumns(Option<BTreeSet<String>>);

/// One entry of the column picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub id: String,
    pub header: String,
    pub checked: bool,
}

impl VisibleColumns {
    /// No constraint: every column is visible.
    pub fn all() -> Self {
        Self(None)
    }

    /// Only the given ids (plus non-hideable columns) are visible.
    pub fn only<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Some(ids.into_iter().map(Into::into).collect()))
    }

    /// Check if the set constrains anything.
    pub fn is_constrained(&self) -> bool {
        self.0.is_some()
    }

    /// Visible ids, when constrained.
    pub fn ids(&self) -> Option<&BTreeSet<String>> {
        self.0.as_ref()
    }

    /// Membership as shown in the picker.
    pub fn contains(&self, id: &str) -> bool {
        self.0.as_ref().is_none_or(|set| set.contains(id))
    }

    /// Whether `column` is rendered.
    pub fn is_visible<T: TableRow>(&self, column: &Column<T>) -> bool {
        !column.hideable || self.contains(column.id())
    }

    /// Effective columns, in declaration order.
    pub fn effective<'c, T: TableRow>(&self, columns: &'c [Column<T>]) -> Vec<&'c Column<T>> {
        columns.iter().filter(|c| self.is_visible(c)).collect()
    }

    /// Effective visible ids: the consumer set plus every non-hideable column.
    pub fn effective_ids<T: TableRow>(&self, columns: &[Column<T>]) -> BTreeSet<String> {
        self.effective(columns)
            .into_iter()
            .map(|c| c.id().to_string())
            .collect()
    }

    /// New set with `column_id` shown or hidden.
    ///
    /// An unconstrained set first expands to every hideable column.
    pub fn with_visibility<T: TableRow>(
        &self,
        columns: &[Column<T>],
        column_id: &str,
        visible: bool,
    ) -> VisibleColumns {
        let mut set = match &self.0 {
            Some(set) => set.clone(),
            None => columns
                .iter()
                .filter(|c| c.hideable)
                .map(|c| c.id().to_string())
                .collect(),
        };
        if visible {
            set.insert(column_id.to_string());
        } else {
            set.remove(column_id);
        }
        VisibleColumns(Some(set))
    }

    /// Picker entries: hideable columns only, checked when visible.
    pub fn picker_entries<T: TableRow>(&self, columns: &[Column<T>]) -> Vec<PickerEntry> {
        columns
            .iter()
            .filter(|c| c.hideable)
            .map(|c| PickerEntry {
                id: c.id().to_string(),
                header: c.header.clone(),
                checked: self.contains(c.id()),
            })
            .collect()
    }
}

/// Controlled column visibility engine.
pub struct VisibilityEngine<'a, T: TableRow> {
    columns: &'a [Column<T>],
    visible: &'a VisibleColumns,
    on_change: Option<&'a Callback<VisibleColumns>>,
}

impl<'a, T: TableRow> VisibilityEngine<'a, T> {
    pub fn new(
        columns: &'a [Column<T>],
        visible: &'a VisibleColumns,
        on_change: Option<&'a Callback<VisibleColumns>>,
    ) -> Self {
        Self {
            columns,
            visible,
            on_change,
        }
    }

    /// Columns actually rendered.
    pub fn effective(&self) -> Vec<&'a Column<T>> {
        self.visible.effective(self.columns)
    }

    /// Show or hide a column.
    ///
    /// Non-hideable and unknown columns are ignored.
    pub fn set_visible(&self, column_id: &str, visible: bool) -> Option<VisibleColumns> {
        let on_change = self.on_change?;
        let column = self.columns.iter().find(|c| c.id() == column_id)?;
        if !column.hideable {
            return None;
        }
        let next = self.visible.with_visibility(self.columns, column_id, visible);
        debug!(
            "Column '{}' {}",
            column_id,
            if visible { "shown" } else { "hidden" }
        );
        on_change(next.clone());
        Some(next)
    }
}

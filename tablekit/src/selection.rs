//! Cross-page row selection.
//!
//! A [`Selection`] is a value: every operation returns a new set and the
//! previous one is left untouched, so a set shared by several views can never
//! change underneath one of them.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::events::Callback;

/// Identifier of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Num(i64),
    Str(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Num(n) => write!(f, "{}", n),
            RowId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId::Num(value)
    }
}

impl From<u32> for RowId {
    fn from(value: u32) -> Self {
        RowId::Num(i64::from(value))
    }
}

impl From<i32> for RowId {
    fn from(value: i32) -> Self {
        RowId::Num(i64::from(value))
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Str(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        RowId::Str(value)
    }
}

/// Tri-state of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderCheckState {
    pub checked: bool,
    pub indeterminate: bool,
}

/// Set of selected row ids, spanning every page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<RowId>,
}

impl Selection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an id is selected.
    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate the selected ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.ids.iter()
    }

    /// Selected ids, sorted.
    pub fn sorted_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// New selection with `id` added or removed.
    pub fn with_row(&self, id: &RowId, checked: bool) -> Selection {
        let mut ids = self.ids.clone();
        if checked {
            ids.insert(id.clone());
        } else {
            ids.remove(id);
        }
        Selection { ids }
    }

    /// New selection with every page id added, or exactly the page ids removed.
    pub fn with_page(&self, page_ids: &[RowId], checked: bool) -> Selection {
        let mut ids = self.ids.clone();
        for id in page_ids {
            if checked {
                ids.insert(id.clone());
            } else {
                ids.remove(id);
            }
        }
        Selection { ids }
    }

    /// How many of `page_ids` are selected.
    pub fn selected_on_page(&self, page_ids: &[RowId]) -> usize {
        page_ids.iter().filter(|id| self.ids.contains(id)).count()
    }

    /// Header checkbox state for the current page.
    pub fn header_state(&self, page_ids: &[RowId]) -> HeaderCheckState {
        let on_page = self.selected_on_page(page_ids);
        let total = page_ids.len();
        HeaderCheckState {
            checked: total > 0 && on_page == total,
            indeterminate: on_page > 0 && on_page < total,
        }
    }
}

impl FromIterator<RowId> for Selection {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Controlled selection engine for one page of rows.
pub struct SelectionEngine<'a> {
    selection: &'a Selection,
    page_ids: Vec<RowId>,
    on_change: Option<&'a Callback<Selection>>,
}

impl<'a> SelectionEngine<'a> {
    /// `page_ids` are the ids of the selectable rows on the current page.
    pub fn new(
        selection: &'a Selection,
        page_ids: Vec<RowId>,
        on_change: Option<&'a Callback<Selection>>,
    ) -> Self {
        Self {
            selection,
            page_ids,
            on_change,
        }
    }

    /// Header checkbox state.
    pub fn header_state(&self) -> HeaderCheckState {
        self.selection.header_state(&self.page_ids)
    }

    /// Select or deselect one row.
    pub fn toggle_row(&self, id: &RowId, checked: bool) -> Option<Selection> {
        let on_change = self.on_change?;
        let next = self.selection.with_row(id, checked);
        debug!(
            "Row {} {}; {} selected",
            id,
            if checked { "selected" } else { "deselected" },
            next.len()
        );
        on_change(next.clone());
        Some(next)
    }

    /// Select or deselect every row on the current page.
    pub fn toggle_select_all_on_page(&self, checked: bool) -> Option<Selection> {
        let on_change = self.on_change?;
        let next = self.selection.with_page(&self.page_ids, checked);
        debug!(
            "Page {} ({} rows); {} selected",
            if checked { "selected" } else { "cleared" },
            self.page_ids.len(),
            next.len()
        );
        on_change(next.clone());
        Some(next)
    }
}

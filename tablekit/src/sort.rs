//! Single-column sort descriptor and its header-click transition.

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::events::Callback;
use crate::table::{Column, TableRow};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Wire name (`asc` / `desc`).
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Header indicator glyph.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// The active sort: a field key and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    /// Field key of the sorted column.
    pub column: String,
    pub direction: SortDirection,
}

impl SortDescriptor {
    /// Ascending sort on a field.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a field.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Direction if this descriptor sorts `field`.
    pub fn direction_for(&self, field: &str) -> Option<SortDirection> {
        (self.column == field).then_some(self.direction)
    }
}

/// Compute the descriptor that follows a click on `field`.
///
/// The active column flips direction; any other column starts ascending.
pub fn next_sort(current: Option<&SortDescriptor>, field: &str) -> SortDescriptor {
    match current {
        Some(sort) if sort.column == field => SortDescriptor {
            column: sort.column.clone(),
            direction: sort.direction.flipped(),
        },
        _ => SortDescriptor::asc(field),
    }
}

/// Controlled sort engine.
///
/// Holds no sort state; the host echoes back whatever it receives.
pub struct SortEngine<'a> {
    current: Option<&'a SortDescriptor>,
    on_change: Option<&'a Callback<SortDescriptor>>,
}

impl<'a> SortEngine<'a> {
    pub fn new(
        current: Option<&'a SortDescriptor>,
        on_change: Option<&'a Callback<SortDescriptor>>,
    ) -> Self {
        Self { current, on_change }
    }

    /// Direction shown on `column`'s header.
    pub fn direction_for<T: TableRow>(&self, column: &Column<T>) -> Option<SortDirection> {
        let field = column.sort_key()?;
        self.current.and_then(|s| s.direction_for(field))
    }

    /// Toggle sort on a header click.
    ///
    /// Returns the descriptor handed to the host, or `None` when the column
    /// is not sortable or no sort callback was supplied.
    pub fn toggle<T: TableRow>(&self, column: &Column<T>) -> Option<SortDescriptor> {
        let on_change = self.on_change?;
        let field = column.sort_key()?;
        let next = next_sort(self.current, field);
        debug!("Sort toggled: {} {}", next.column, next.direction.as_str());
        on_change(next.clone());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_column_flips() {
        let current = SortDescriptor::asc("name");
        assert_eq!(next_sort(Some(&current), "name"), SortDescriptor::desc("name"));
        let current = SortDescriptor::desc("name");
        assert_eq!(next_sort(Some(&current), "name"), SortDescriptor::asc("name"));
    }

    #[test]
    fn test_other_column_starts_ascending() {
        let current = SortDescriptor::desc("name");
        assert_eq!(next_sort(Some(&current), "code"), SortDescriptor::asc("code"));
        assert_eq!(next_sort(None, "code"), SortDescriptor::asc("code"));
    }
}

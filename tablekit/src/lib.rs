pub mod config;
pub mod embedded;
pub mod events;
pub mod format;
pub mod node;
pub mod pagination;
pub mod preferences;
pub mod search;
pub mod selection;
pub mod sort;
pub mod table;
pub mod toolbar;
pub mod visibility;

pub use table::DataTable;

pub mod prelude {
    pub use crate::config::{ConfigError, TableConfig};
    pub use crate::embedded::{FloatingAction, parse_embedded, render_floating_action};
    pub use crate::events::{Callback, EventResult, Interaction, callback};
    pub use crate::format::{FormattedDateTime, PLACEHOLDER, format_date_time};
    pub use crate::node::{Alignment, ButtonVariant, Layout, Node, Role, Tone};
    pub use crate::pagination::{PageItem, PaginationDescriptor, compute_page_window, total_pages};
    pub use crate::preferences::{
        MemoryPreferenceStore, PreferenceError, PreferenceStore, TablePreferences,
    };
    pub use crate::search::{DebouncedSearch, SearchPhase};
    pub use crate::selection::{RowId, Selection};
    pub use crate::sort::{SortDescriptor, SortDirection, next_sort};
    pub use crate::table::{
        CellResult, CellValue, Column, ColumnKind, DataTable, EmptyState, RenderFault, RenderState,
        RowAttrs, TableEvent, TableProps, TableRow, ok_text,
    };
    pub use crate::toolbar::{BulkAction, ToolbarProps};
    pub use crate::visibility::VisibleColumns;
}

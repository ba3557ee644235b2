//! Languages.

use tablekit::node::ButtonVariant;
use tablekit::selection::RowId;
use tablekit::table::{CellValue, Column, ColumnKind, TableRow};
use tablekit::toolbar::BulkAction;

use crate::screen::{DELETE_ACTION, FilterField, ScreenDefinition};
use crate::source::MemorySource;

pub const TABLE_ID: &str = "languages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code.
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub is_active: bool,
    pub rtl: bool,
}

impl TableRow for Language {
    fn id(&self) -> Option<RowId> {
        Some(self.code.as_str().into())
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "code" => self.code.as_str().into(),
            "name" => self.name.as_str().into(),
            "native_name" => self.native_name.as_str().into(),
            "is_active" => self.is_active.into(),
            "rtl" => self.rtl.into(),
            _ => CellValue::Null,
        }
    }
}

pub fn definition() -> ScreenDefinition<Language> {
    let columns = vec![
        Column::field("code", "Code").sortable().always_visible(),
        Column::field("name", "Name").sortable(),
        Column::field("native_name", "Native name"),
        Column::field("is_active", "Active").kind(ColumnKind::Boolean),
        Column::field("rtl", "Right-to-left").kind(ColumnKind::Boolean),
    ];
    ScreenDefinition::new(TABLE_ID, "Languages", columns)
        .filter(FilterField::boolean("is_active", "Active"))
        .bulk_action(BulkAction::new("Delete", DELETE_ACTION).variant(ButtonVariant::Destructive))
        .bulk_action(BulkAction::new("Deactivate", "deactivate"))
        .empty("No languages configured.", "Add language")
}

pub fn source(items: Vec<Language>) -> MemorySource<Language> {
    MemorySource::new(items).search_fields(["code", "name", "native_name"])
}

pub fn sample() -> Vec<Language> {
    [
        ("en", "English", "English", true, false),
        ("de", "German", "Deutsch", true, false),
        ("fr", "French", "Français", true, false),
        ("ar", "Arabic", "العربية", false, true),
        ("he", "Hebrew", "עברית", false, true),
        ("pl", "Polish", "Polski", true, false),
    ]
    .into_iter()
    .map(|(code, name, native_name, is_active, rtl)| Language {
        code: code.to_string(),
        name: name.to_string(),
        native_name: native_name.to_string(),
        is_active,
        rtl,
    })
    .collect()
}

//! Back-office host for the tablekit engine.
//!
//! List screens own the table descriptors, load from a [`source::ListSource`],
//! mirror their list state into the location query string and keep per-table
//! preferences in a SQLite settings store.

pub mod paths;
pub mod query;
pub mod screen;
pub mod screens;
pub mod settings;
pub mod source;

pub use query::{FilterValue, ListQuery, Location, MemoryLocation, QueryMirror};
pub use screen::{FilterField, ListScreen, ScreenDefinition, ScreenMessage};
pub use settings::{SettingsPreferenceStore, SettingsProvider, SqliteBackend};
pub use source::{ListSource, MemorySource, Page, ResourceState, SourceError};

//! Roles.

use chrono::{DateTime, Duration, Utc};

use tablekit::node::{ButtonVariant, Node, Tone};
use tablekit::selection::RowId;
use tablekit::table::{CellValue, Column, ColumnKind, RenderFault, TableRow};
use tablekit::toolbar::BulkAction;

use crate::screen::{DELETE_ACTION, ScreenDefinition};
use crate::source::MemorySource;

pub const TABLE_ID: &str = "roles";

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub permissions: Vec<String>,
    /// Built-in roles cannot be deleted.
    pub system: bool,
    pub created_at: DateTime<Utc>,
}

impl TableRow for Role {
    fn id(&self) -> Option<RowId> {
        // System roles are not selectable.
        (!self.system).then(|| self.id.into())
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => self.name.as_str().into(),
            "permissions" => (self.permissions.len() as i64).into(),
            "system" => self.system.into(),
            "created_at" => self.created_at.into(),
            _ => CellValue::Null,
        }
    }
}

pub fn definition() -> ScreenDefinition<Role> {
    let columns = vec![
        Column::field("name", "Name").sortable().always_visible(),
        Column::field("permissions", "Permissions")
            .sortable()
            .kind(ColumnKind::Number)
            .render(|_, role: &Role, _| {
                if role.permissions.iter().any(String::is_empty) {
                    return Err(RenderFault::new("blank permission name"));
                }
                Ok(Node::text(role.permissions.join(", ")))
            }),
        Column::field("system", "Built-in").kind(ColumnKind::Boolean),
        Column::field("created_at", "Created")
            .sortable()
            .kind(ColumnKind::DateTime),
        Column::computed("Status", |role: &Role, _| {
            Ok(if role.system {
                Node::text_toned("Locked", Tone::Muted)
            } else {
                Node::text("Editable")
            })
        })
        .with_id("status"),
    ];
    ScreenDefinition::new(TABLE_ID, "Roles", columns)
        .bulk_action(BulkAction::new("Delete", DELETE_ACTION).variant(ButtonVariant::Destructive))
        .empty("No roles defined.", "Create role")
}

pub fn source(items: Vec<Role>) -> MemorySource<Role> {
    MemorySource::new(items).search_fields(["name"])
}

pub fn sample(now: DateTime<Utc>) -> Vec<Role> {
    let role = |id: i64, name: &str, permissions: &[&str], system: bool, days: i64| Role {
        id,
        name: name.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        system,
        created_at: now - Duration::days(days),
    };
    vec![
        role(1, "Administrator", &["*"], true, 400),
        role(2, "Catalog manager", &["products.write", "categories.write"], false, 90),
        role(3, "Support", &["orders.read", "customers.read"], false, 12),
        role(4, "Translator", &["translations.write"], false, 2),
    ]
}

//! Currencies.

use chrono::{DateTime, Duration, Utc};

use tablekit::node::{Alignment, ButtonVariant, Node, Tone};
use tablekit::selection::RowId;
use tablekit::table::{CellValue, Column, ColumnKind, TableRow, ok_text};
use tablekit::toolbar::BulkAction;

use crate::screen::{DELETE_ACTION, FilterField, ScreenDefinition};
use crate::source::MemorySource;

pub const TABLE_ID: &str = "currencies";

#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub symbol: String,
    /// Against the base currency.
    pub exchange_rate: f64,
    pub is_default: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TableRow for Currency {
    fn id(&self) -> Option<RowId> {
        Some(self.id.into())
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "code" => self.code.as_str().into(),
            "name" => self.name.as_str().into(),
            "symbol" => self.symbol.as_str().into(),
            "exchange_rate" => self.exchange_rate.into(),
            "is_default" => self.is_default.into(),
            "updated_at" => self.updated_at.into(),
            _ => CellValue::Null,
        }
    }
}

pub fn definition() -> ScreenDefinition<Currency> {
    let columns = vec![
        Column::field("code", "Code").sortable().always_visible().width("6rem"),
        Column::field("name", "Name").sortable().min_width("12rem"),
        Column::field("symbol", "Symbol").align(Alignment::Center),
        Column::field("exchange_rate", "Rate")
            .sortable()
            .kind(ColumnKind::Number)
            .align(Alignment::Right)
            .render(|value, _, _| match value {
                CellValue::Number(rate) => ok_text(format!("{:.4}", rate)),
                other => ok_text(other.display()),
            }),
        Column::field("is_default", "Default").kind(ColumnKind::Boolean),
        Column::field("updated_at", "Updated")
            .sortable()
            .kind(ColumnKind::DateTime),
        Column::computed("Label", |currency: &Currency, _| {
            Ok(Node::text_toned(
                format!("{} ({})", currency.name, currency.symbol),
                Tone::Muted,
            ))
        })
        .with_id("label"),
    ];
    ScreenDefinition::new(TABLE_ID, "Currencies", columns)
        .filter(FilterField::boolean("is_default", "Default only"))
        .filter(FilterField::text("code", "Code"))
        .bulk_action(
            BulkAction::new("Delete", DELETE_ACTION)
                .variant(ButtonVariant::Destructive)
                .icon("trash"),
        )
        .empty("No currencies yet.", "Add currency")
}

pub fn source(items: Vec<Currency>) -> MemorySource<Currency> {
    MemorySource::new(items).search_fields(["code", "name"])
}

/// Demo data.
pub fn sample(now: DateTime<Utc>) -> Vec<Currency> {
    let rows = [
        ("EUR", "Euro", "€", 1.0, true),
        ("USD", "US Dollar", "$", 1.0843, false),
        ("GBP", "Pound Sterling", "£", 0.8571, false),
        ("JPY", "Yen", "¥", 163.21, false),
        ("CHF", "Swiss Franc", "Fr", 0.9512, false),
        ("SEK", "Swedish Krona", "kr", 11.43, false),
        ("PLN", "Zloty", "zł", 4.318, false),
        ("CZK", "Czech Koruna", "Kč", 25.02, false),
        ("DKK", "Danish Krone", "kr", 7.459, false),
        ("NOK", "Norwegian Krone", "kr", 11.62, false),
        ("HUF", "Forint", "Ft", 395.4, false),
        ("RON", "Romanian Leu", "lei", 4.977, false),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (code, name, symbol, rate, is_default))| Currency {
            id: i as i64 + 1,
            code: code.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            exchange_rate: rate,
            is_default,
            updated_at: (i % 4 != 3).then(|| now - Duration::hours(i as i64 * 7)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields() {
        let currency = &sample(Utc::now())[0];
        assert_eq!(currency.field("code"), CellValue::Text("EUR".to_string()));
        assert_eq!(currency.field("is_default"), CellValue::Bool(true));
        assert_eq!(currency.field("missing"), CellValue::Null);
        assert_eq!(currency.id(), Some(RowId::Num(1)));
    }

    #[test]
    fn test_schema_covers_filters() {
        let schema = definition().schema();
        assert!(schema.kind("is_default").is_some());
        assert!(schema.kind("code").is_some());
        assert!(schema.kind("name").is_none());
    }
}

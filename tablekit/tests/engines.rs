//! Tests for the sort, selection, visibility and pagination engines.

use std::sync::{Arc, Mutex};

use tablekit::events::{Callback, callback};
use tablekit::pagination::{PageItem, compute_item_range, compute_page_window, total_pages};
use tablekit::selection::{RowId, Selection, SelectionEngine};
use tablekit::sort::{SortDescriptor, SortDirection, SortEngine, next_sort};
use tablekit::table::{CellValue, Column, TableRow, ok_text};
use tablekit::visibility::{VisibilityEngine, VisibleColumns};

#[derive(Debug, Clone)]
struct Row(i64);

impl TableRow for Row {
    fn id(&self) -> Option<RowId> {
        Some(self.0.into())
    }

    fn field(&self, _key: &str) -> CellValue {
        CellValue::Integer(self.0)
    }
}

fn recorder<A: Send + 'static>() -> (Callback<A>, Arc<Mutex<Vec<A>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (callback(move |a| sink.lock().unwrap().push(a)), log)
}

fn ids(values: &[i64]) -> Vec<RowId> {
    values.iter().copied().map(RowId::from).collect()
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_small_totals_show_every_page() {
    for total in 1..=5 {
        let window = compute_page_window(1, total, 5);
        assert_eq!(window, (1..=total).map(PageItem::Page).collect::<Vec<_>>());
    }
}

#[test]
fn test_large_totals_keep_current_and_edges() {
    for total in 6..=30 {
        for current in 1..=total {
            let window = compute_page_window(current, total, 5);
            assert!(window.contains(&PageItem::Page(current)));
            assert_eq!(window.first(), Some(&PageItem::Page(1)));
            assert_eq!(window.last(), Some(&PageItem::Page(total)));

            let ellipses: Vec<usize> = window
                .iter()
                .enumerate()
                .filter(|(_, item)| **item == PageItem::Ellipsis)
                .map(|(i, _)| i)
                .collect();
            assert!(ellipses.len() <= 2, "{:?}", window);
            if let Some(&first) = ellipses.first() {
                // An ellipsis always sits next to an edge page.
                assert!(first == 1 || first == window.len() - 2, "{:?}", window);
            }
        }
    }
}

#[test]
fn test_23_items_over_pages_of_10() {
    assert_eq!(total_pages(23, 10), 3);
    assert_eq!(compute_item_range(2, 10, 23).label(), "11–20 of 23");
    assert_eq!(compute_item_range(3, 10, 23).label(), "21–23 of 23");
}

#[test]
fn test_total_pages_is_at_least_one() {
    assert_eq!(total_pages(0, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
}

// =============================================================================
// Sort
// =============================================================================

#[test]
fn test_next_sort_cycle() {
    let first = next_sort(None, "name");
    assert_eq!(first, SortDescriptor::asc("name"));
    let second = next_sort(Some(&first), "name");
    assert_eq!(second.direction, SortDirection::Desc);
    let third = next_sort(Some(&second), "name");
    assert_eq!(third.direction, SortDirection::Asc);
    assert_eq!(next_sort(Some(&second), "code"), SortDescriptor::asc("code"));
}

#[test]
fn test_sort_engine_reports_through_callback() {
    let (on_sort, log) = recorder();
    let column: Column<Row> = Column::field("code", "Code").sortable();
    let current = SortDescriptor::asc("code");

    let next = SortEngine::new(Some(&current), Some(&on_sort)).toggle(&column);
    assert_eq!(next, Some(SortDescriptor::desc("code")));
    assert_eq!(*log.lock().unwrap(), vec![SortDescriptor::desc("code")]);
}

#[test]
fn test_sort_engine_ignores_computed_columns() {
    let (on_sort, log) = recorder();
    let column: Column<Row> = Column::computed("Total", |_, _| ok_text("x")).sortable();
    assert_eq!(SortEngine::new(None, Some(&on_sort)).toggle(&column), None);
    assert!(log.lock().unwrap().is_empty());
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_toggle_row_is_idempotent() {
    let (on_select, _) = recorder();
    let empty = Selection::new();
    let id = RowId::from(7);

    let once = SelectionEngine::new(&empty, ids(&[7]), Some(&on_select))
        .toggle_row(&id, true)
        .expect("selection");
    let twice = SelectionEngine::new(&once, ids(&[7]), Some(&on_select))
        .toggle_row(&id, true)
        .expect("selection");
    assert_eq!(once, twice);
}

#[test]
fn test_select_all_then_select_none_on_next_page() {
    let (on_select, _) = recorder();
    let page_one = ids(&[1, 2, 3]);
    let page_two = ids(&[4, 5, 6]);

    let after_one = SelectionEngine::new(&Selection::new(), page_one.clone(), Some(&on_select))
        .toggle_select_all_on_page(true)
        .expect("selection");
    let after_two = SelectionEngine::new(&after_one, page_two, Some(&on_select))
        .toggle_select_all_on_page(false)
        .expect("selection");

    assert_eq!(after_two.len(), page_one.len());
}

#[test]
fn test_header_tri_state() {
    let page = ids(&[1, 2, 3]);

    let partial: Selection = ids(&[1, 2]).into_iter().collect();
    let state = partial.header_state(&page);
    assert!(!state.checked && state.indeterminate);

    let full: Selection = page.iter().cloned().collect();
    let state = full.header_state(&page);
    assert!(state.checked && !state.indeterminate);

    let state = Selection::new().header_state(&page);
    assert!(!state.checked && !state.indeterminate);

    // An empty page is never checked.
    assert!(!full.header_state(&[]).checked);
}

#[test]
fn test_selection_is_replaced_not_mutated() {
    let (on_select, _) = recorder();
    let original: Selection = ids(&[1]).into_iter().collect();
    let next = SelectionEngine::new(&original, ids(&[1, 2]), Some(&on_select))
        .toggle_row(&RowId::from(2), true)
        .expect("selection");
    assert_eq!(original.len(), 1);
    assert_eq!(next.len(), 2);
}

#[test]
fn test_selection_without_callback_is_absent() {
    let selection = Selection::new();
    let engine = SelectionEngine::new(&selection, ids(&[1]), None);
    assert!(engine.toggle_row(&RowId::from(1), true).is_none());
    assert!(engine.toggle_select_all_on_page(true).is_none());
}

#[test]
fn test_string_and_numeric_ids_are_distinct() {
    let selection: Selection = [RowId::from(1), RowId::from("1")].into_iter().collect();
    assert_eq!(selection.len(), 2);
}

// =============================================================================
// Visibility
// =============================================================================

fn visibility_columns() -> Vec<Column<Row>> {
    vec![
        Column::field("code", "Code").always_visible(),
        Column::field("name", "Name"),
        Column::field("rate", "Rate"),
    ]
}

#[test]
fn test_effective_columns_include_non_hideable() {
    let columns = visibility_columns();
    for visible in [
        VisibleColumns::all(),
        VisibleColumns::only(Vec::<String>::new()),
        VisibleColumns::only(["rate"]),
    ] {
        let effective = visible.effective_ids(&columns);
        assert!(effective.contains("code"), "{:?}", visible);
    }
}

#[test]
fn test_effective_columns_keep_declaration_order() {
    let columns = visibility_columns();
    let visible = VisibleColumns::only(["rate", "name"]);
    let order: Vec<&str> = visible
        .effective(&columns)
        .into_iter()
        .map(|c| c.id())
        .collect();
    assert_eq!(order, vec!["code", "name", "rate"]);
}

#[test]
fn test_hiding_from_unconstrained_starts_from_all_hideable() {
    let (on_visible, log) = recorder();
    let columns = visibility_columns();
    let visible = VisibleColumns::all();

    let next = VisibilityEngine::new(&columns, &visible, Some(&on_visible)).set_visible("name", false);
    assert_eq!(next, Some(VisibleColumns::only(["rate"])));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_picker_lists_hideable_columns_only() {
    let columns = visibility_columns();
    let entries = VisibleColumns::only(["rate"]).picker_entries(&columns);
    let summary: Vec<(&str, bool)> = entries.iter().map(|e| (e.id.as_str(), e.checked)).collect();
    assert_eq!(summary, vec![("name", false), ("rate", true)]);

    let all = VisibleColumns::all().picker_entries(&columns);
    assert!(all.iter().all(|e| e.checked));
}

#[test]
fn test_non_hideable_column_cannot_be_hidden() {
    let (on_visible, log) = recorder();
    let columns = visibility_columns();
    let visible = VisibleColumns::all();
    let engine = VisibilityEngine::new(&columns, &visible, Some(&on_visible));
    assert_eq!(engine.set_visible("code", false), None);
    assert_eq!(engine.set_visible("unknown", false), None);
    assert!(log.lock().unwrap().is_empty());
}

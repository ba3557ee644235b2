//! Tests for the list screen.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use backoffice::query::{FilterValue, Location, MemoryLocation};
use backoffice::screen::ListScreen;
use backoffice::screens::Currency;
use backoffice::screens::currencies;
use backoffice::source::{ListSource, MemorySource};
use tablekit::config::TableConfig;
use tablekit::preferences::{MemoryPreferenceStore, PreferenceStore, TablePreferences};
use tablekit::selection::RowId;
use tablekit::sort::SortDirection;
use tablekit::table::{RenderState, TableEvent};

struct Fixture {
    screen: ListScreen<MemorySource<Currency>>,
    source: Arc<MemorySource<Currency>>,
    store: Arc<MemoryPreferenceStore>,
    location: Arc<MemoryLocation>,
}

async fn mount_with(query: &str, items: Vec<Currency>, store: MemoryPreferenceStore) -> Fixture {
    let source = Arc::new(currencies::source(items));
    let store = Arc::new(store);
    let location = Arc::new(MemoryLocation::new(query));
    let screen = ListScreen::mount(
        currencies::definition(),
        source.clone(),
        store.clone(),
        location.clone(),
        TableConfig::new(),
    )
    .await;
    Fixture {
        screen,
        source,
        store,
        location,
    }
}

async fn mount(query: &str) -> Fixture {
    mount_with(
        query,
        currencies::sample(Utc::now()),
        MemoryPreferenceStore::new(),
    )
    .await
}

fn codes(screen: &ListScreen<MemorySource<Currency>>) -> Vec<String> {
    screen
        .data()
        .as_ready()
        .map(|page| page.items.iter().map(|c| c.code.clone()).collect())
        .unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn test_mount_reads_location() {
    let f = mount("?page=2&limit=5").await;
    assert_eq!(f.screen.query().page, 2);
    assert_eq!(f.screen.query().limit, 5);
    assert_eq!(codes(&f.screen), vec!["SEK", "PLN", "CZK", "DKK", "NOK"]);
    assert_eq!(f.screen.table().state(), RenderState::Populated);
}

#[tokio::test(start_paused = true)]
async fn test_mount_stores_default_preferences() {
    let f = mount("").await;
    assert_eq!(f.screen.query().limit, 10);
    let stored = f.store.load(currencies::TABLE_ID).await.unwrap();
    assert_eq!(stored, Some(TablePreferences::new(10)));
}

#[tokio::test(start_paused = true)]
async fn test_stored_page_size_applies_without_limit_in_url() {
    let store = MemoryPreferenceStore::new();
    store
        .save(currencies::TABLE_ID, &TablePreferences::new(20))
        .await
        .unwrap();
    let f = mount_with("", currencies::sample(Utc::now()), store).await;
    assert_eq!(f.screen.query().limit, 20);
    assert_eq!(codes(&f.screen).len(), 12);
}

#[tokio::test(start_paused = true)]
async fn test_header_click_sorts() {
    let mut f = mount("").await;
    f.screen.table_mut().click("currencies-sort-name");
    assert_eq!(f.screen.process().await, 1);

    let sort = f.screen.sort().unwrap();
    assert_eq!(sort.column, "name");
    assert_eq!(sort.direction, SortDirection::Asc);
    assert_eq!(codes(&f.screen)[0], "CZK");

    f.screen.table_mut().click("currencies-sort-name");
    f.screen.process().await;
    assert_eq!(f.screen.sort().unwrap().direction, SortDirection::Desc);
    assert_eq!(codes(&f.screen)[0], "PLN");
}

#[tokio::test(start_paused = true)]
async fn test_search_resets_page() {
    let mut f = mount("").await;
    f.screen.table_mut().click("currencies-page-next");
    f.screen.process().await;
    assert_eq!(f.screen.query().page, 2);

    f.screen
        .table_mut()
        .dispatch(TableEvent::SearchInput("euro".to_string()));
    // Nothing posted before the debounce commits.
    assert_eq!(f.screen.process().await, 0);

    tokio::time::sleep(Duration::from_millis(450)).await;
    f.screen.process().await;
    assert_eq!(f.screen.query().page, 1);
    assert_eq!(f.screen.query().search, "euro");
    assert_eq!(codes(&f.screen), vec!["EUR"]);
    assert_eq!(f.screen.table().search_value(), Some("euro"));
}

#[tokio::test(start_paused = true)]
async fn test_page_size_change_persists() {
    let mut f = mount("?page=2").await;
    f.screen.table_mut().dispatch(TableEvent::PageSizeChange(20));
    f.screen.process().await;

    assert_eq!(f.screen.query().page, 1);
    assert_eq!(f.screen.query().limit, 20);
    let stored = f.store.load(currencies::TABLE_ID).await.unwrap().unwrap();
    assert_eq!(stored.page_size, 20);
}

#[tokio::test(start_paused = true)]
async fn test_query_is_mirrored_once() {
    let mut f = mount("").await;
    f.screen.table_mut().click("currencies-page-next");
    f.screen.process().await;
    assert_eq!(f.location.replace_count(), 0);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(f.location.query(), "page=2&limit=10");
    assert_eq!(f.location.replace_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_bulk_delete_clears_selection() {
    let mut f = mount("").await;
    f.screen.table_mut().click("currencies-row-0-select");
    f.screen.process().await;
    f.screen.table_mut().click("currencies-row-1-select");
    f.screen.process().await;
    assert_eq!(f.screen.selection().len(), 2);

    f.screen.table_mut().click("currencies-bulk-delete");
    f.screen.process().await;

    assert!(f.screen.selection().is_empty());
    assert_eq!(f.source.len().await, 10);
    assert_eq!(f.screen.data().as_ready().unwrap().total, 10);
    assert_eq!(codes(&f.screen)[0], "GBP");
}

#[tokio::test(start_paused = true)]
async fn test_row_click_navigates() {
    let mut f = mount("").await;
    f.screen.table_mut().click("currencies-row-2");
    f.screen.process().await;
    assert_eq!(f.screen.take_navigation().as_deref(), Some("/currencies/3"));
    assert_eq!(f.screen.take_navigation(), None);
}

#[tokio::test(start_paused = true)]
async fn test_row_checkbox_does_not_navigate() {
    let mut f = mount("").await;
    f.screen.table_mut().click("currencies-row-0-select");
    f.screen.process().await;
    assert!(f.screen.selection().contains(&RowId::Num(1)));
    assert_eq!(f.screen.take_navigation(), None);
}

#[tokio::test(start_paused = true)]
async fn test_source_failure_offers_retry() {
    let source = Arc::new(currencies::source(currencies::sample(Utc::now())));
    source.set_unavailable(true);
    let mut screen = ListScreen::mount(
        currencies::definition(),
        source.clone(),
        Arc::new(MemoryPreferenceStore::new()),
        Arc::new(MemoryLocation::default()),
        TableConfig::new(),
    )
    .await;

    assert!(screen.data().is_error());
    assert_eq!(screen.table().state(), RenderState::Empty);
    let text = screen.render().text_content();
    assert!(text.contains("Could not load Currencies"));
    assert!(text.contains("Retry"));

    source.set_unavailable(false);
    screen.table_mut().click("currencies-empty-action");
    screen.process().await;
    assert!(screen.data().is_ready());
    assert_eq!(screen.table().state(), RenderState::Populated);
}

#[tokio::test(start_paused = true)]
async fn test_empty_action_creates() {
    let mut f = mount_with("", Vec::new(), MemoryPreferenceStore::new()).await;
    assert!(f.screen.render().text_content().contains("No currencies yet."));
    f.screen.table_mut().click("currencies-empty-action");
    f.screen.process().await;
    assert_eq!(f.screen.take_navigation().as_deref(), Some("/currencies/new"));
}

#[tokio::test(start_paused = true)]
async fn test_filters() {
    let mut f = mount("?page=2").await;
    f.screen
        .set_filter("is_default", Some(FilterValue::Bool(true)))
        .await;
    assert_eq!(f.screen.query().page, 1);
    assert_eq!(codes(&f.screen), vec!["EUR"]);

    f.screen.table_mut().click("currencies-filters-toggle");
    f.screen.process().await;
    let rendered = f.screen.render();
    assert!(rendered.find_by_id("currencies-filter-panel").is_some());
    assert!(rendered.find_by_id("currencies-filter-is_default").is_some());
    assert!(rendered.text_content().contains("Filters (1)"));

    f.screen.set_filter("is_default", None).await;
    assert_eq!(codes(&f.screen).len(), 10);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(f.location.query(), "page=1&limit=10");
}

#[tokio::test(start_paused = true)]
async fn test_hidden_columns_persist() {
    let mut f = mount("").await;
    f.screen.table_mut().click("currencies-column-toggle-name");
    f.screen.process().await;

    assert!(!f.screen.preferences().visible_columns.contains("name"));
    let stored = f.store.load(currencies::TABLE_ID).await.unwrap().unwrap();
    assert!(!stored.visible_columns.contains("name"));
    assert!(f.screen.table().render().find_by_id("currencies-header-name").is_none());
    assert!(f.screen.table().render().find_by_id("currencies-header-code").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_page_past_the_end_moves_to_last_page() {
    let f = mount("?page=5&limit=10").await;
    assert_eq!(f.screen.query().page, 2);
    assert_eq!(codes(&f.screen), vec!["HUF", "RON"]);
    assert_eq!(f.screen.table().state(), RenderState::Populated);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(f.location.query(), "page=2&limit=10");
}

#[tokio::test(start_paused = true)]
async fn test_deleting_last_page_moves_back() {
    let mut f = mount("?page=2").await;
    f.screen.table_mut().click("currencies-select-all");
    f.screen.process().await;
    assert_eq!(f.screen.selection().len(), 2);

    f.screen.table_mut().click("currencies-bulk-delete");
    f.screen.process().await;

    assert_eq!(f.screen.query().page, 1);
    assert_eq!(f.screen.data().as_ready().unwrap().total, 10);
    assert_eq!(f.screen.table().state(), RenderState::Populated);
    assert!(f.screen.render().find_by_id("currencies-pagination").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_failed_deletes_stay_selected() {
    let mut f = mount("").await;
    f.screen.table_mut().click("currencies-row-0-select");
    f.screen.process().await;
    f.screen.table_mut().click("currencies-row-1-select");
    f.screen.process().await;

    // Removed elsewhere before the bulk action runs.
    f.source.delete(&RowId::Num(2)).await.unwrap();

    f.screen.table_mut().click("currencies-bulk-delete");
    f.screen.process().await;

    assert_eq!(f.source.len().await, 10);
    assert!(!f.screen.selection().contains(&RowId::Num(1)));
    assert!(f.screen.selection().contains(&RowId::Num(2)));
    assert_eq!(f.screen.selection().len(), 1);
}

//! Tests for the in-memory list source.

use chrono::Utc;

use backoffice::query::{FilterValue, ListQuery};
use backoffice::screens::{Language, Role, languages, roles};
use backoffice::source::{ListRequest, ListSource, ResourceState, SourceError};
use tablekit::selection::RowId;
use tablekit::sort::SortDescriptor;

fn request(limit: u32) -> ListRequest {
    ListRequest {
        query: ListQuery::new(limit),
        sort: None,
    }
}

#[tokio::test]
async fn test_pages_and_total() {
    let source = languages::source(languages::sample());
    let mut req = request(4);
    req.query.page = 2;

    let page = source.list(&req).await.unwrap();
    assert_eq!(page.total, 6);
    assert_eq!(page.page, 2);
    let codes: Vec<_> = page.items.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["he", "pl"]);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let source = languages::source(languages::sample());
    let mut req = request(10);
    req.query.page = 9;
    let page = source.list(&req).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 6);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let source = languages::source(languages::sample());
    let mut req = request(10);
    req.query.search = "DEUTSCH".to_string();
    let page = source.list(&req).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].code, "de");
}

#[tokio::test]
async fn test_bool_filter() {
    let source = languages::source(languages::sample());
    let mut req = request(10);
    req.query
        .filters
        .insert("rtl".to_string(), FilterValue::Bool(true));
    let page = source.list(&req).await.unwrap();
    let codes: Vec<_> = page.items.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["ar", "he"]);
}

#[tokio::test]
async fn test_sort_descending() {
    let source = roles::source(roles::sample(Utc::now()));
    let req = ListRequest {
        query: ListQuery::new(10),
        sort: Some(SortDescriptor::desc("created_at")),
    };
    let page = source.list(&req).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Translator", "Support", "Catalog manager", "Administrator"]
    );
}

#[tokio::test]
async fn test_zero_limit_is_rejected() {
    let source = languages::source(languages::sample());
    assert!(matches!(
        source.list(&request(0)).await,
        Err(SourceError::Rejected(_))
    ));
}

#[tokio::test]
async fn test_crud() {
    let source = languages::source(Vec::new());
    let italian = Language {
        code: "it".to_string(),
        name: "Italian".to_string(),
        native_name: "Italiano".to_string(),
        is_active: false,
        rtl: false,
    };
    source.create(italian.clone()).await.unwrap();
    assert!(matches!(
        source.create(italian.clone()).await,
        Err(SourceError::Rejected(_))
    ));

    let id = RowId::from("it");
    let active = Language {
        is_active: true,
        ..italian
    };
    source.update(&id, active.clone()).await.unwrap();
    assert_eq!(source.list(&request(10)).await.unwrap().items, vec![active]);

    source.delete(&id).await.unwrap();
    assert_eq!(source.delete(&id).await, Err(SourceError::NotFound(id.clone())));
    assert!(source.is_empty().await);
}

#[tokio::test]
async fn test_unavailable_source_fails() {
    let source = roles::source(roles::sample(Utc::now()));
    source.set_unavailable(true);
    let result = source.list(&request(10)).await;
    assert!(matches!(result, Err(SourceError::Unavailable(_))));

    let state: ResourceState<Vec<Role>> = match result {
        Ok(page) => ResourceState::Ready(page.items),
        Err(e) => ResourceState::Error(e),
    };
    assert!(state.is_error());
    assert!(state.as_ready().is_none());
}

//! Derived view behavior across a growing multi-page collection.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use nexus_catalog::{CatalogSession, ProductSource};
use nexus_catalog_core::{CategoryFilter, SortOrder};
use nexus_catalog_integration_tests::FakeCatalog;

fn session_over(source: Arc<FakeCatalog>) -> CatalogSession {
    CatalogSession::new(source as Arc<dyn ProductSource>)
}

#[tokio::test]
async fn categories_grow_with_the_collection() {
    let source = Arc::new(FakeCatalog::with_pages(2, 4));
    let session = session_over(source);

    assert!(session.categories().await.is_empty());

    session.load_next_page().await.expect("page 1");
    assert_eq!(session.categories().await, ["clothing", "electronics"]);

    // Categories come from the full collection, not the filtered view.
    session
        .set_category(CategoryFilter::Only("electronics".to_owned()))
        .await;
    session.load_next_page().await.expect("page 2");
    assert_eq!(session.categories().await, ["clothing", "electronics"]);
}

#[tokio::test]
async fn category_with_no_matches_is_an_empty_view() {
    let source = Arc::new(FakeCatalog::with_pages(1, 6));
    let session = session_over(source);
    session.load_next_page().await.expect("page 1");

    session
        .set_category(CategoryFilter::Only("appliances".to_owned()))
        .await;
    let view = session.view().await;
    assert!(view.is_empty());
}

#[tokio::test]
async fn filters_never_trigger_fetches() {
    let source = Arc::new(FakeCatalog::with_pages(2, 4));
    let session = session_over(Arc::clone(&source));
    session.load_next_page().await.expect("page 1");
    let calls = source.list_calls.load(Ordering::SeqCst);

    session.set_search("unit".to_owned()).await;
    session
        .set_category(CategoryFilter::Only("clothing".to_owned()))
        .await;
    session.set_sort(SortOrder::PriceDescending).await;
    let _ = session.view().await;
    let _ = session.view().await;
    let _ = session.categories().await;

    assert_eq!(source.list_calls.load(Ordering::SeqCst), calls);
    assert_eq!(source.get_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sort_is_stable_across_recomputations() {
    // Every page repeats the same descending price ramp, so equal prices
    // exist across pages once two pages are loaded.
    let source = Arc::new(FakeCatalog::with_pages(2, 4));
    let session = session_over(source);
    session.load_next_page().await.expect("page 1");
    session.load_next_page().await.expect("page 2");

    session.set_sort(SortOrder::PriceAscending).await;
    let first: Vec<String> = session.view().await.iter().map(|p| p.id.clone()).collect();

    // Force recomputation by toggling the filter away and back.
    session.set_sort(SortOrder::Unsorted).await;
    let _ = session.view().await;
    session.set_sort(SortOrder::PriceAscending).await;
    let second: Vec<String> = session.view().await.iter().map(|p| p.id.clone()).collect();

    assert_eq!(first, second);

    // Ties (same price on both pages) keep arrival order: page 1 first.
    let page1_pos = first.iter().position(|id| id == "p1-0").expect("p1-0");
    let page2_pos = first.iter().position(|id| id == "p2-0").expect("p2-0");
    assert!(page1_pos < page2_pos);
}

#[tokio::test]
async fn search_narrows_the_view_case_insensitively() {
    let source = Arc::new(FakeCatalog::with_pages(1, 10));
    let session = session_over(source);
    session.load_next_page().await.expect("page 1");

    session.set_search("UNIT P1-3".to_owned()).await;
    let view = session.view().await;
    assert_eq!(view.len(), 1);
    assert_eq!(view.first().map(|p| p.id.as_str()), Some("p1-3"));
}

//! Dashboard behaviour against mock and HTTP catalog sources

mod common;

use catalog_client::{
    ApiClient, CatalogSource, ClientError, MockCatalogSource, REQUEST_ID_HEADER,
};
use catalog_console::{
    AccessState, BrowseCommand, CategorySelection, DashboardView, PageFetcher, PageUpdate,
    StatusFilter, StorefrontView, render,
};
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tokio::sync::mpsc;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paged_source(total_pages: u32) -> MockCatalogSource {
    (1..=total_pages).fold(
        MockCatalogSource::new().with_categories(categories()),
        |source, number| source.with_page(numbered_page(number, total_pages)),
    )
}

#[tokio::test]
async fn test_each_navigation_issues_exactly_one_fetch() {
    init_test_logging();
    let source = paged_source(3);
    let mut view = DashboardView::new(admin_session(), &dashboard_config());

    view.mount(&source).await;
    assert_eq!(source.requested_pages(), vec![1]);
    assert!(!view.pagination().can_go_previous());

    assert!(!view.previous_page(&source).await);
    assert_eq!(source.requested_pages(), vec![1]);

    assert!(view.next_page(&source).await);
    assert!(view.next_page(&source).await);
    assert_eq!(source.requested_pages(), vec![1, 2, 3]);
    assert!(!view.pagination().can_go_next());

    assert!(!view.next_page(&source).await);
    assert_eq!(source.requested_pages(), vec![1, 2, 3]);

    assert!(view.previous_page(&source).await);
    assert_eq!(source.requested_pages(), vec![1, 2, 3, 2]);
    assert_eq!(view.pagination().current_page(), 2);
    assert_eq!(view.products()[0].id, 2);
}

#[tokio::test(start_paused = true)]
async fn test_slow_stale_response_is_discarded() {
    init_test_logging();
    let source = paged_source(3).with_delay(2, 500);
    let mut view = DashboardView::new(admin_session(), &dashboard_config());
    view.mount(&source).await;

    let shared: Arc<dyn CatalogSource> = Arc::new(source.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Operator clicks Next twice before page 2 answers.
    for ticket in [view.request_next(), view.request_next()].into_iter().flatten() {
        let source = Arc::clone(&shared);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = PageFetcher::fetch(source.as_ref(), ticket).await;
            tx.send((ticket, result)).unwrap();
        });
    }
    drop(tx);

    let mut applied = Vec::new();
    while let Some((ticket, result)) = rx.recv().await {
        applied.push((ticket.page(), view.complete_fetch(ticket, result).is_applied()));
    }

    assert_eq!(applied, vec![(3, true), (2, false)]);
    assert_eq!(view.pagination().current_page(), 3);
    assert_eq!(view.products()[0].id, 3);
    assert!(!view.is_loading());
    assert_eq!(source.requested_pages(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_non_admin_never_requests_products() {
    init_test_logging();
    let source = paged_source(2);

    for session in [seller_session(), catalog_core::SessionContext::anonymous()] {
        let mut view = DashboardView::new(session, &dashboard_config());
        assert_eq!(view.access(), AccessState::Denied);

        view.mount(&source).await;
        view.load_page(&source).await;
        assert!(!view.next_page(&source).await);
        assert!(!view.reload(&source).await);

        assert!(view.products().is_empty());
        assert!(render::dashboard(&view).starts_with("Access denied"));
    }

    assert!(source.requested_pages().is_empty());
    assert_eq!(source.category_request_count(), 2);
}

#[tokio::test]
async fn test_failed_reload_keeps_prior_page() {
    init_test_logging();
    let healthy = paged_source(2);
    let broken = MockCatalogSource::new().with_product_failure("connection reset");
    let mut view = DashboardView::new(admin_session(), &dashboard_config());

    view.mount(&healthy).await;
    let before = view.snapshot();

    assert!(!view.reload(&broken).await);

    assert_eq!(view.snapshot(), before);
    assert!(!view.is_loading());
    assert_eq!(broken.requested_pages(), vec![1]);
}

#[tokio::test]
async fn test_failed_next_page_keeps_cursor_on_shown_page() {
    init_test_logging();
    let healthy = paged_source(3);
    let broken = MockCatalogSource::new().with_product_failure("connection reset");
    let mut view = DashboardView::new(admin_session(), &dashboard_config());

    view.mount(&healthy).await;
    let before = view.snapshot();

    assert!(!view.next_page(&broken).await);

    assert_eq!(broken.requested_pages(), vec![2]);
    assert_eq!(view.snapshot(), before);
    assert_eq!(view.pagination().current_page(), 1);
    assert_eq!(view.products()[0].id, 1);
    assert!(render::dashboard(&view).contains("(Previous) Page 1 of 3 [Next]"));

    // The operator can retry the same step.
    assert!(view.next_page(&healthy).await);
    assert_eq!(view.pagination().current_page(), 2);
}

#[test]
fn test_browse_completions_redraw_only_on_visible_change() {
    init_test_logging();
    let mut view = DashboardView::new(admin_session(), &dashboard_config());
    let first = BrowseCommand::Reload.apply(&mut view).unwrap();
    assert!(view.complete_fetch(first, Ok(numbered_page(1, 3))).needs_redraw());

    // Two quick Next presses; the first answer arrives last.
    let to_two = BrowseCommand::Next.apply(&mut view).unwrap();
    let to_three = BrowseCommand::Next.apply(&mut view).unwrap();
    assert!(render::dashboard(&view).contains("Loading..."));

    let failed = view.complete_fetch(to_three, Err(ClientError::mock("timeout")));
    assert!(matches!(failed, PageUpdate::Failed(_)));
    assert!(failed.needs_redraw());
    assert!(!view.is_loading());
    assert_eq!(view.pagination().current_page(), 1);

    let stale = view.complete_fetch(to_two, Ok(numbered_page(2, 3)));
    assert!(matches!(stale, PageUpdate::Stale));
    assert!(!stale.needs_redraw());
    assert_eq!(view.products()[0].id, 1);

    let retry = BrowseCommand::Next.apply(&mut view).unwrap();
    assert_eq!(retry.page(), 2);
    assert!(view.complete_fetch(retry, Ok(numbered_page(2, 3))).is_applied());
    assert!(render::dashboard(&view).contains("[Previous] Page 2 of 3 [Next]"));
}

#[test]
fn test_cursor_follows_server_reported_page() {
    init_test_logging();
    let mut view = DashboardView::new(admin_session(), &dashboard_config());
    let first = view.begin_fetch().unwrap();
    view.complete_fetch(first, Ok(numbered_page(1, 6)));

    let asked = view.request_next().unwrap();
    assert_eq!(asked.page(), 2);

    // The backend answers with a different page than requested.
    assert!(view.complete_fetch(asked, Ok(numbered_page(5, 6))).is_applied());

    assert_eq!(view.pagination().current_page(), 5);
    assert!(view.pagination().can_go_previous());
    assert!(view.pagination().can_go_next());
    assert!(render::dashboard(&view).contains("[Previous] Page 5 of 6 [Next]"));

    // Navigation steps by one from the adopted page.
    assert_eq!(view.request_next().unwrap().page(), 6);

    let mut view = DashboardView::new(admin_session(), &dashboard_config());
    let first = view.begin_fetch().unwrap();
    view.complete_fetch(first, Ok(numbered_page(1, 6)));
    let asked = view.request_next().unwrap();
    view.complete_fetch(asked, Ok(numbered_page(3, 3)));

    assert_eq!(view.pagination().current_page(), 3);
    assert!(!view.pagination().can_go_next());
    assert!(view.request_next().is_none());
}

#[tokio::test]
async fn test_refresh_clears_text_filters_without_fetching() {
    init_test_logging();
    let source = MockCatalogSource::new().with_page(catalog_core::ProductPage {
        products: vec![
            product(1, "Blue Widget", true, true),
            product(2, "Red Gadget", false, true),
            product(3, "Green Widget", true, false),
        ],
        ..numbered_page(1, 1)
    });
    let mut view = DashboardView::new(admin_session(), &dashboard_config());
    view.mount(&source).await;

    view.set_search("widget");
    view.set_status(StatusFilter::Active);
    view.set_category(CategorySelection::id(1));
    view.set_seller(Some(7));
    assert_eq!(view.visible_products().len(), 1);

    view.refresh();

    assert_eq!(view.criteria().search, "");
    assert_eq!(view.criteria().status, StatusFilter::All);
    assert_eq!(view.criteria().category, CategorySelection::All);
    assert_eq!(view.criteria().seller_id, Some(7));
    assert_eq!(view.visible_products().len(), 3);
    assert_eq!(source.requested_pages(), vec![1]);
}

#[tokio::test]
async fn test_dashboard_over_http() {
    init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/adminproducts"))
        .and(query_param("page", "1"))
        .and(header_exists(REQUEST_ID_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(admin_products_body(1, 3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let mut view = DashboardView::new(admin_session(), &dashboard_config());
    view.mount(&client).await;

    // Nameless product 13 drops out of any search.
    view.set_search("e");
    let text = render::dashboard(&view);

    assert!(text.contains("2 of 3 products"));
    assert!(text.contains(
        "TOTAL PRODUCTS: 2 | PENDING PRODUCTS: 7 | INACTIVE PRODUCTS: 5 | ACTIVE PRODUCTS: 20"
    ));
    assert!(text.contains("(Previous) Page 1 of 3 [Next]"));
    assert!(text.contains("WIDGETS"));

    view.set_search("");
    view.set_status(StatusFilter::Inactive);
    assert_eq!(view.visible_products().len(), 2);
}

#[tokio::test]
async fn test_storefront_survives_category_failure() {
    init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let mut storefront = StorefrontView::new();
    storefront.load(&client).await;

    assert!(storefront.nav_labels().is_empty());
    assert!(storefront.categories().is_loaded());
    assert!(render::storefront(&storefront).contains("Shop all products"));
}

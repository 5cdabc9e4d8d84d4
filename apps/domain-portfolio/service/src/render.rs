use super::*;
use crate::web_maud::{WebPage, render_page};

// Pages read one snapshot under the shared lock and render from the copy.

pub(super) async fn dashboard_page(State(state): State<AppState>) -> Response {
    let snapshot = state.store.snapshot().await;
    let page = WebPage::dashboard(&snapshot.domains, &snapshot.sales, snapshot.stats());
    page_response(&page)
}

pub(super) async fn domains_page(State(state): State<AppState>) -> Response {
    let snapshot = state.store.snapshot().await;
    page_response(&WebPage::domains(&snapshot.domains, snapshot.settings))
}

pub(super) async fn evaluation_page(State(state): State<AppState>) -> Response {
    let snapshot = state.store.snapshot().await;
    page_response(&WebPage::evaluation(&snapshot.domains, &snapshot.settings))
}

pub(super) async fn statistics_page(State(state): State<AppState>) -> Response {
    let snapshot = state.store.snapshot().await;
    let page = WebPage::statistics(
        &snapshot.domains,
        &snapshot.sales,
        snapshot.stats(),
        snapshot.categories(),
    );
    page_response(&page)
}

pub(super) async fn sales_page(State(state): State<AppState>) -> Response {
    page_response(&WebPage::sales(&state.store.list_sales().await))
}

pub(super) async fn settings_page(State(state): State<AppState>) -> Response {
    page_response(&WebPage::settings(state.store.list_settings().await))
}

fn page_response(page: &WebPage) -> Response {
    tracing::debug!(target: "domain_portfolio.http", path = %page.path, "rendering page");
    html_response(StatusCode::OK, render_page(page))
}

use std::any::Any;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::handler::HandlerWithoutStateExt;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use portfolio_domain::parse::{
    amount_or_zero, non_negative_amount, normalize_text, optional_amount, optional_date,
    required_amount, required_date,
};
use portfolio_domain::{
    AmountInput, CategorySummary, DomainAsset, DomainPatch, Evaluation, IdInput, NewDomain,
    NewSale, ParseError, PortfolioStats, SaleRecord, SettingsCatalog, SettingsList,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api_envelope;
pub mod config;
pub mod openapi;
pub mod portfolio_store;
pub mod request_body;
pub mod seed;
pub mod web_htmx;
pub mod web_maud;

mod render;

use crate::api_envelope::{ApiError, ApiSuccess, api_panic_response, ok_payload, panic_detail};
use crate::config::Config;
use crate::openapi::{
    ROUTE_API_DOMAIN_BY_ID, ROUTE_API_DOMAINS, ROUTE_API_DOMAINS_BULK, ROUTE_API_EVALUATIONS,
    ROUTE_API_HEALTH, ROUTE_API_SALES, ROUTE_API_SETTINGS, ROUTE_API_SETTINGS_REMOVE,
    ROUTE_API_STATS, ROUTE_OPENAPI_JSON, openapi_document,
};
use crate::portfolio_store::PortfolioStore;
use crate::request_body::ApiBody;
use crate::web_maud::{HTMX_ASSET_PATH, render_not_found_page, render_server_error_page};

const SERVICE_NAME: &str = "domain-portfolio-service";
const ROUTE_DASHBOARD: &str = "/";
const ROUTE_DOMAINS_PAGE: &str = "/domains";
const ROUTE_EVALUATION_PAGE: &str = "/evaluation";
const ROUTE_STATISTICS_PAGE: &str = "/statistics";
const ROUTE_SALES_PAGE: &str = "/sales";
const ROUTE_SETTINGS_PAGE: &str = "/settings";
const CACHE_NO_STORE: &str = "no-store";
const DEFAULT_DOMAIN_STATUS: &str = "Active";

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    store: PortfolioStore,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct EmptyPayload {}

#[derive(Debug, Serialize)]
struct DomainPayload {
    domain: DomainAsset,
}

#[derive(Debug, Serialize)]
struct DomainsPayload {
    domains: Vec<DomainAsset>,
}

#[derive(Debug, Serialize)]
struct BulkRejection {
    index: usize,
    message: String,
}

#[derive(Debug, Serialize)]
struct BulkPayload {
    domains: Vec<DomainAsset>,
    count: usize,
    rejected: Vec<BulkRejection>,
}

#[derive(Debug, Serialize)]
struct SalePayload {
    sale: SaleRecord,
}

#[derive(Debug, Serialize)]
struct SalesPayload {
    sales: Vec<SaleRecord>,
}

#[derive(Debug, Serialize)]
struct SettingsPayload {
    settings: SettingsCatalog,
}

#[derive(Debug, Serialize)]
struct StatsPayload {
    stats: PortfolioStats,
    categories: Vec<CategorySummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainBody {
    name: Option<String>,
    registrar: Option<String>,
    category: Option<String>,
    purchase_date: Option<String>,
    status: Option<String>,
    purchase_price: Option<AmountInput>,
}

#[derive(Debug, Deserialize)]
struct BulkDomainsBody {
    domains: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationBody {
    domain_id: Option<IdInput>,
    tool: Option<String>,
    date: Option<String>,
    value: Option<AmountInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaleBody {
    domain_name: Option<String>,
    sale_date: Option<String>,
    sale_price: Option<AmountInput>,
    buyer: Option<String>,
    purchase_price: Option<AmountInput>,
}

#[derive(Debug, Deserialize)]
struct SettingBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    value: Option<String>,
}

impl DomainBody {
    fn into_new_domain(self) -> Result<NewDomain, ParseError> {
        let status = normalize_text(self.status.as_deref());
        Ok(NewDomain {
            name: normalize_text(self.name.as_deref()),
            registrar: normalize_text(self.registrar.as_deref()),
            category: normalize_text(self.category.as_deref()),
            purchase_date: required_date("purchaseDate", self.purchase_date.as_deref())?,
            status: if status.is_empty() {
                DEFAULT_DOMAIN_STATUS.to_string()
            } else {
                status
            },
            purchase_price: non_negative_amount("purchasePrice", self.purchase_price.as_ref())?,
        })
    }

    fn into_patch(self) -> Result<DomainPatch, ParseError> {
        let text = |value: Option<String>| value.map(|value| normalize_text(Some(&value)));
        Ok(DomainPatch {
            purchase_date: optional_date("purchaseDate", self.purchase_date.as_deref())?,
            purchase_price: optional_amount("purchasePrice", self.purchase_price.as_ref())?,
            name: text(self.name),
            registrar: text(self.registrar),
            category: text(self.category),
            status: text(self.status).filter(|status| !status.is_empty()),
        })
    }
}

impl SaleBody {
    fn into_new_sale(self) -> Result<NewSale, ParseError> {
        Ok(NewSale {
            domain_name: normalize_text(self.domain_name.as_deref()),
            sale_date: required_date("saleDate", self.sale_date.as_deref())?,
            sale_price: non_negative_amount("salePrice", self.sale_price.as_ref())?,
            buyer: normalize_text(self.buyer.as_deref()),
            purchase_price: amount_or_zero(self.purchase_price.as_ref()),
        })
    }
}

/// Router with the starter portfolio loaded. This is also what an external
/// host mounts in embedded mode.
pub fn build_router(config: Config) -> Router {
    build_router_with_store(config, PortfolioStore::seeded())
}

pub fn build_router_with_store(config: Config, store: PortfolioStore) -> Router {
    let static_dir = config.static_dir.clone();
    let state = AppState {
        config: Arc::new(config),
        store,
    };

    let api: Router<AppState> = Router::new()
        .route(ROUTE_API_HEALTH, get(health).fallback(not_found_page))
        .route(ROUTE_API_STATS, get(portfolio_stats).fallback(not_found_page))
        .route(
            ROUTE_API_DOMAINS,
            get(list_domains).post(create_domain).fallback(not_found_page),
        )
        .route(
            ROUTE_API_DOMAINS_BULK,
            post(bulk_create_domains).fallback(not_found_page),
        )
        .route(
            ROUTE_API_DOMAIN_BY_ID,
            get(show_domain)
                .put(update_domain)
                .delete(delete_domain)
                .fallback(not_found_page),
        )
        .route(ROUTE_API_EVALUATIONS, post(add_evaluation).fallback(not_found_page))
        .route(
            ROUTE_API_SALES,
            get(list_sales).post(create_sale).fallback(not_found_page),
        )
        .route(
            ROUTE_API_SETTINGS,
            get(list_settings).post(add_setting).fallback(not_found_page),
        )
        .route(
            ROUTE_API_SETTINGS_REMOVE,
            post(remove_setting).fallback(not_found_page),
        )
        .route(ROUTE_OPENAPI_JSON, get(openapi_spec).fallback(not_found_page))
        .layer(CatchPanicLayer::custom(api_panic_response))
        .layer(middleware::from_fn(web_htmx::api_htmx_headers));

    let pages: Router<AppState> = Router::new()
        .route(ROUTE_DASHBOARD, get(render::dashboard_page).fallback(not_found_page))
        .route(ROUTE_DOMAINS_PAGE, get(render::domains_page).fallback(not_found_page))
        .route(ROUTE_EVALUATION_PAGE, get(render::evaluation_page).fallback(not_found_page))
        .route(ROUTE_STATISTICS_PAGE, get(render::statistics_page).fallback(not_found_page))
        .route(ROUTE_SALES_PAGE, get(render::sales_page).fallback(not_found_page))
        .route(ROUTE_SETTINGS_PAGE, get(render::settings_page).fallback(not_found_page))
        .layer(CatchPanicLayer::custom(page_panic_response));

    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found_page.into_service());

    tracing::debug!(
        target: "domain_portfolio.http",
        service = SERVICE_NAME,
        static_dir = %state.config.static_dir.display(),
        "router built"
    );

    Router::new()
        .merge(pages)
        .merge(api)
        .fallback_service(static_files)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http()),
        )
}

pub async fn serve(config: Config) -> std::io::Result<()> {
    if let Some(expected) = missing_htmx_asset(&config.static_dir).await {
        tracing::warn!(
            target: "domain_portfolio.http",
            expected = %expected.display(),
            "htmx asset not found; page forms will not submit until it is installed"
        );
    }
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        target: "domain_portfolio.http",
        service = SERVICE_NAME,
        bind_addr = %listener.local_addr()?,
        "domain portfolio listening"
    );
    axum::serve(listener, build_router(config)).await
}

/// Location the pages load htmx from, when nothing is there yet.
async fn missing_htmx_asset(static_dir: &FsPath) -> Option<PathBuf> {
    let expected = static_dir.join(HTMX_ASSET_PATH.trim_start_matches('/'));
    match tokio::fs::try_exists(&expected).await {
        Ok(true) => None,
        _ => Some(expected),
    }
}

fn html_response(status: StatusCode, html: String) -> Response {
    (
        status,
        [
            (CONTENT_TYPE, "text/html; charset=utf-8"),
            (CACHE_CONTROL, CACHE_NO_STORE),
        ],
        html,
    )
        .into_response()
}

async fn not_found_page() -> Response {
    html_response(StatusCode::NOT_FOUND, render_not_found_page())
}

fn page_panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic_detail(panic.as_ref());
    tracing::error!(target: "domain_portfolio.http", detail = %detail, "page handler panicked");
    let mut response = Response::new(Body::from(render_server_error_page()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn openapi_spec() -> Json<serde_json::Value> {
    Json(openapi_document())
}

async fn portfolio_stats(State(state): State<AppState>) -> Json<ApiSuccess<StatsPayload>> {
    let snapshot = state.store.snapshot().await;
    ok_payload(StatsPayload {
        stats: snapshot.stats(),
        categories: snapshot.categories(),
    })
}

async fn list_domains(State(state): State<AppState>) -> Json<ApiSuccess<DomainsPayload>> {
    ok_payload(DomainsPayload {
        domains: state.store.list_domains().await,
    })
}

async fn create_domain(
    State(state): State<AppState>,
    ApiBody(body): ApiBody<DomainBody>,
) -> Result<Json<ApiSuccess<DomainPayload>>, ApiError> {
    let input = body.into_new_domain()?;
    let domain = state.store.create_domain(input).await?;
    Ok(ok_payload(DomainPayload { domain }))
}

async fn bulk_create_domains(
    State(state): State<AppState>,
    ApiBody(body): ApiBody<BulkDomainsBody>,
) -> Result<Json<ApiSuccess<BulkPayload>>, ApiError> {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (index, raw) in body.domains.into_iter().enumerate() {
        let parsed = serde_json::from_value::<DomainBody>(raw)
            .map_err(|_| ParseError::new("domains", "element is not a valid domain object"))
            .and_then(DomainBody::into_new_domain);
        match parsed {
            Ok(input) => accepted.push(input),
            Err(error) => rejected.push(BulkRejection {
                index,
                message: error.to_string(),
            }),
        }
    }

    if !rejected.is_empty() {
        tracing::warn!(
            target: "domain_portfolio.http",
            rejected = rejected.len(),
            "bulk import skipped invalid elements"
        );
    }

    let domains = state.store.bulk_create_domains(accepted).await?;
    Ok(ok_payload(BulkPayload {
        count: domains.len(),
        domains,
        rejected,
    }))
}

async fn show_domain(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiSuccess<DomainPayload>>, ApiError> {
    let id = parse_path_id(&raw_id).ok_or_else(domain_not_found)?;
    let domain = state
        .store
        .find_domain(id)
        .await
        .ok_or_else(domain_not_found)?;
    Ok(ok_payload(DomainPayload { domain }))
}

async fn update_domain(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiBody(body): ApiBody<DomainBody>,
) -> Result<Json<ApiSuccess<DomainPayload>>, ApiError> {
    let patch = body.into_patch()?;
    let id = parse_path_id(&raw_id).ok_or_else(domain_not_found)?;
    let domain = state.store.update_domain(id, patch).await?;
    Ok(ok_payload(DomainPayload { domain }))
}

async fn delete_domain(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiSuccess<EmptyPayload>>, ApiError> {
    if let Some(id) = parse_path_id(&raw_id) {
        state.store.delete_domain(id).await?;
    }
    Ok(ok_payload(EmptyPayload {}))
}

async fn add_evaluation(
    State(state): State<AppState>,
    ApiBody(body): ApiBody<EvaluationBody>,
) -> Result<Json<ApiSuccess<EmptyPayload>>, ApiError> {
    let evaluation = Evaluation {
        tool: normalize_text(body.tool.as_deref()),
        date: required_date("date", body.date.as_deref())?,
        value: required_amount("value", body.value.as_ref())?,
    };
    let domain_id = body
        .domain_id
        .as_ref()
        .and_then(IdInput::to_id)
        .ok_or_else(domain_not_found)?;
    state.store.add_evaluation(domain_id, evaluation).await?;
    Ok(ok_payload(EmptyPayload {}))
}

async fn list_sales(State(state): State<AppState>) -> Json<ApiSuccess<SalesPayload>> {
    ok_payload(SalesPayload {
        sales: state.store.list_sales().await,
    })
}

async fn create_sale(
    State(state): State<AppState>,
    ApiBody(body): ApiBody<SaleBody>,
) -> Result<Json<ApiSuccess<SalePayload>>, ApiError> {
    let sale = state.store.create_sale(body.into_new_sale()?).await?;
    Ok(ok_payload(SalePayload { sale }))
}

async fn list_settings(State(state): State<AppState>) -> Json<ApiSuccess<SettingsPayload>> {
    ok_payload(SettingsPayload {
        settings: state.store.list_settings().await,
    })
}

async fn add_setting(
    State(state): State<AppState>,
    ApiBody(body): ApiBody<SettingBody>,
) -> Result<Json<ApiSuccess<SettingsPayload>>, ApiError> {
    let (kind, value) = setting_target(body);
    let settings = state.store.add_setting(kind, &value).await?;
    Ok(ok_payload(SettingsPayload { settings }))
}

async fn remove_setting(
    State(state): State<AppState>,
    ApiBody(body): ApiBody<SettingBody>,
) -> Result<Json<ApiSuccess<SettingsPayload>>, ApiError> {
    let (kind, value) = setting_target(body);
    let settings = state.store.remove_setting(kind, &value).await?;
    Ok(ok_payload(SettingsPayload { settings }))
}

fn setting_target(body: SettingBody) -> (Option<SettingsList>, String) {
    let kind = body
        .kind
        .as_deref()
        .and_then(|name| SettingsList::from_name(name.trim()));
    (kind, normalize_text(body.value.as_deref()))
}

fn parse_path_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn domain_not_found() -> ApiError {
    ApiError::NotFound("Domain not found".to_string())
}

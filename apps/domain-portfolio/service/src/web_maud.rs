use maud::{DOCTYPE, Markup, PreEscaped, html};
use portfolio_domain::{
    CategorySummary, DomainAsset, PortfolioStats, SaleRecord, SettingsCatalog, SettingsList,
    current_value, format_date, format_money, sum_money,
};

/// Served from the static directory; the file is installed at deploy time.
pub const HTMX_ASSET_PATH: &str = "/assets/htmx.min.js";
const STATUS_OPTIONS: [&str; 4] = ["Active", "For Sale", "Parked", "Expired"];
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct EvaluationView {
    pub tool: String,
    pub date: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct DomainView {
    pub id: u64,
    pub name: String,
    pub registrar: String,
    pub category: String,
    pub purchase_date: String,
    pub expiration_date: String,
    pub status: String,
    pub purchase_price: String,
    pub current_value: String,
    pub evaluations: Vec<EvaluationView>,
}

impl From<&DomainAsset> for DomainView {
    fn from(domain: &DomainAsset) -> Self {
        Self {
            id: domain.id,
            name: domain.name.clone(),
            registrar: domain.registrar.clone(),
            category: domain.category.clone(),
            purchase_date: format_date(domain.purchase_date),
            expiration_date: format_date(domain.expiration_date),
            status: domain.status.clone(),
            purchase_price: format_money(domain.purchase_price),
            current_value: format_money(current_value(domain)),
            evaluations: domain
                .evaluations
                .iter()
                .map(|evaluation| EvaluationView {
                    tool: evaluation.tool.clone(),
                    date: format_date(evaluation.date),
                    value: format_money(evaluation.value),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaleView {
    pub domain_name: String,
    pub sale_date: String,
    pub sale_price: String,
    pub buyer: String,
    pub purchase_price: String,
    pub profit: String,
}

impl From<&SaleRecord> for SaleView {
    fn from(sale: &SaleRecord) -> Self {
        Self {
            domain_name: sale.domain_name.clone(),
            sale_date: format_date(sale.sale_date),
            sale_price: format_money(sale.sale_price),
            buyer: sale.buyer.clone(),
            purchase_price: format_money(sale.purchase_price),
            profit: format_money(sale.profit()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum WebBody {
    Dashboard {
        stats: PortfolioStats,
        recent_domains: Vec<DomainView>,
        recent_sales: Vec<SaleView>,
    },
    Domains {
        domains: Vec<DomainView>,
        settings: SettingsCatalog,
    },
    Evaluation {
        domains: Vec<DomainView>,
        tools: Vec<String>,
    },
    Statistics {
        stats: PortfolioStats,
        categories: Vec<CategorySummary>,
        top_domains: Vec<DomainView>,
        sales: Vec<SaleView>,
    },
    Sales {
        sales: Vec<SaleView>,
        total: String,
    },
    Settings {
        settings: SettingsCatalog,
    },
}

#[derive(Debug, Clone)]
pub struct WebPage {
    pub title: String,
    pub path: String,
    pub body: WebBody,
}

impl WebPage {
    pub fn dashboard(domains: &[DomainAsset], sales: &[SaleRecord], stats: PortfolioStats) -> Self {
        Self {
            title: "Dashboard".to_string(),
            path: "/".to_string(),
            body: WebBody::Dashboard {
                stats,
                recent_domains: domains.iter().rev().take(RECENT_LIMIT).map(DomainView::from).collect(),
                recent_sales: sales.iter().rev().take(RECENT_LIMIT).map(SaleView::from).collect(),
            },
        }
    }

    pub fn domains(domains: &[DomainAsset], settings: SettingsCatalog) -> Self {
        Self {
            title: "Domains".to_string(),
            path: "/domains".to_string(),
            body: WebBody::Domains {
                domains: domains.iter().map(DomainView::from).collect(),
                settings,
            },
        }
    }

    pub fn evaluation(domains: &[DomainAsset], settings: &SettingsCatalog) -> Self {
        Self {
            title: "Evaluation".to_string(),
            path: "/evaluation".to_string(),
            body: WebBody::Evaluation {
                domains: domains.iter().map(DomainView::from).collect(),
                tools: settings.evaluation_tools.clone(),
            },
        }
    }

    pub fn statistics(
        domains: &[DomainAsset],
        sales: &[SaleRecord],
        stats: PortfolioStats,
        categories: Vec<CategorySummary>,
    ) -> Self {
        let mut ranked: Vec<&DomainAsset> = domains.iter().collect();
        ranked.sort_by(|left, right| current_value(right).cmp(&current_value(left)));
        Self {
            title: "Statistics".to_string(),
            path: "/statistics".to_string(),
            body: WebBody::Statistics {
                stats,
                categories,
                top_domains: ranked.into_iter().take(RECENT_LIMIT).map(DomainView::from).collect(),
                sales: sales.iter().map(SaleView::from).collect(),
            },
        }
    }

    pub fn sales(sales: &[SaleRecord]) -> Self {
        let total = sum_money(sales.iter().map(|sale| sale.sale_price));
        Self {
            title: "Sales".to_string(),
            path: "/sales".to_string(),
            body: WebBody::Sales {
                sales: sales.iter().map(SaleView::from).collect(),
                total: format_money(total),
            },
        }
    }

    pub fn settings(settings: SettingsCatalog) -> Self {
        Self {
            title: "Settings".to_string(),
            path: "/settings".to_string(),
            body: WebBody::Settings { settings },
        }
    }
}

pub fn render_page(page: &WebPage) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page.title) " | Domain Portfolio" }
                style { (PreEscaped(styles())) }
                script src=(HTMX_ASSET_PATH) defer {}
            }
            body {
                div class="dp-app" {
                    (topbar(&page.path))
                    main id="dp-main" class="dp-main" {
                        @match &page.body {
                            WebBody::Dashboard { stats, recent_domains, recent_sales } => {
                                (dashboard_panel(stats, recent_domains, recent_sales))
                            }
                            WebBody::Domains { domains, settings } => {
                                (domains_panel(domains, settings))
                            }
                            WebBody::Evaluation { domains, tools } => {
                                (evaluation_panel(domains, tools))
                            }
                            WebBody::Statistics { stats, categories, top_domains, sales } => {
                                (statistics_panel(stats, categories, top_domains, sales))
                            }
                            WebBody::Sales { sales, total } => {
                                (sales_panel(sales, total))
                            }
                            WebBody::Settings { settings } => {
                                (settings_panel(settings))
                            }
                        }
                    }
                }
            }
        }
    };

    markup.into_string()
}

pub fn render_not_found_page() -> String {
    message_page(
        "Page Not Found",
        "The page you're looking for doesn't exist.",
    )
}

pub fn render_server_error_page() -> String {
    message_page(
        "Server Error",
        "Something went wrong. Check the server logs for details.",
    )
}

fn message_page(heading: &str, description: &str) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (heading) " | Domain Portfolio" }
                style { (PreEscaped(styles())) }
            }
            body {
                main class="dp-main" {
                    section class="dp-card dp-message" {
                        h1 { (heading) }
                        p class="dp-muted" { (description) }
                        a class="dp-btn primary" href="/" { "Go back to Dashboard" }
                    }
                }
            }
        }
    };
    markup.into_string()
}

fn topbar(path: &str) -> Markup {
    let nav = [
        ("/", "Dashboard"),
        ("/domains", "Domains"),
        ("/evaluation", "Evaluation"),
        ("/statistics", "Statistics"),
        ("/sales", "Sales"),
        ("/settings", "Settings"),
    ];

    html! {
        header class="dp-topbar" {
            div class="dp-brand" { "Domain Portfolio" }
            nav class="dp-nav" {
                @for (href, label) in nav {
                    a class={(if path == href { "dp-nav-link active" } else { "dp-nav-link" })} href=(href) { (label) }
                }
            }
        }
    }
}

fn stat_cards(stats: &PortfolioStats) -> Markup {
    html! {
        div class="dp-grid stats" {
            (stat_card("Total domains", &stats.total_domains.to_string()))
            (stat_card("Sold domains", &stats.sold_domains.to_string()))
            (stat_card("Total investment", &format!("${}", stats.total_investment)))
            (stat_card("Portfolio value", &format!("${}", stats.total_value)))
            (stat_card("Total sales", &format!("${}", stats.total_sales)))
            (stat_card("ROI", &format!("{}%", stats.roi)))
        }
    }
}

fn stat_card(label: &str, value: &str) -> Markup {
    html! {
        div class="dp-card dp-stat" {
            span class="dp-stat-label" { (label) }
            span class="dp-stat-value" { (value) }
        }
    }
}

fn dashboard_panel(stats: &PortfolioStats, domains: &[DomainView], sales: &[SaleView]) -> Markup {
    html! {
        (stat_cards(stats))
        div class="dp-grid two" {
            section class="dp-card" {
                h2 { "Recent domains" }
                @if domains.is_empty() {
                    p class="dp-muted" { "No domains yet." }
                } @else {
                    table class="dp-table" {
                        thead { tr { th { "Name" } th { "Status" } th { "Expires" } th { "Value" } } }
                        tbody {
                            @for domain in domains {
                                tr {
                                    td { (domain.name) }
                                    td { (domain.status) }
                                    td { (domain.expiration_date) }
                                    td { "$" (domain.current_value) }
                                }
                            }
                        }
                    }
                }
                a class="dp-btn" href="/domains" { "Manage domains" }
            }
            section class="dp-card" {
                h2 { "Recent sales" }
                (sales_table(sales))
                a class="dp-btn" href="/sales" { "All sales" }
            }
        }
    }
}

fn domains_panel(domains: &[DomainView], settings: &SettingsCatalog) -> Markup {
    html! {
        section class="dp-card" {
            h1 { "Domains" }
            form id="domain-form" class="dp-form inline"
                hx-post="/api/domains"
                hx-swap="none" {
                (domain_fields(None, settings))
                button type="submit" class="dp-btn primary" { "Add domain" }
            }
            p class="dp-muted" {
                "Bulk imports are accepted as JSON at " code { "POST /api/domains/bulk" } "."
            }
        }
        section class="dp-card" {
            @if domains.is_empty() {
                p class="dp-muted" { "No domains in the portfolio." }
            } @else {
                table class="dp-table" {
                    thead {
                        tr {
                            th { "Name" } th { "Registrar" } th { "Category" } th { "Purchased" }
                            th { "Expires" } th { "Status" } th { "Price" } th { "Value" } th {}
                        }
                    }
                    tbody {
                        @for domain in domains {
                            tr id={(format!("domain-{}", domain.id))} {
                                td { (domain.name) }
                                td { (domain.registrar) }
                                td { (domain.category) }
                                td { (domain.purchase_date) }
                                td { (domain.expiration_date) }
                                td { span class="dp-badge" { (domain.status) } }
                                td { "$" (domain.purchase_price) }
                                td { "$" (domain.current_value) }
                                td class="dp-actions" {
                                    details {
                                        summary class="dp-btn subtle" { "Edit" }
                                        form class="dp-form"
                                            hx-put={(format!("/api/domains/{}", domain.id))}
                                            hx-swap="none" {
                                            (domain_fields(Some(domain), settings))
                                            button type="submit" class="dp-btn primary" { "Save" }
                                        }
                                    }
                                    button type="button" class="dp-btn danger"
                                        hx-delete={(format!("/api/domains/{}", domain.id))}
                                        hx-confirm={(format!("Delete {}?", domain.name))}
                                        hx-swap="none" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn domain_fields(domain: Option<&DomainView>, settings: &SettingsCatalog) -> Markup {
    let name = domain.map(|domain| domain.name.as_str());
    let registrar = domain.map(|domain| domain.registrar.as_str());
    let category = domain.map(|domain| domain.category.as_str());
    let status = domain.map_or("Active", |domain| domain.status.as_str());
    html! {
        label { "Name" input type="text" name="name" value=[name] required; }
        label { "Registrar" (select_field("registrar", &settings.registrars, registrar)) }
        label { "Category" (select_field("category", &settings.categories, category)) }
        label { "Purchase date"
            input type="date" name="purchaseDate" value=[domain.map(|domain| domain.purchase_date.as_str())] required;
        }
        label { "Status" (select_field("status", &STATUS_OPTIONS.map(str::to_string), Some(status))) }
        label { "Purchase price"
            input type="number" name="purchasePrice" min="0" step="0.01" value=[domain.map(|domain| domain.purchase_price.as_str())] required;
        }
    }
}

fn select_field(name: &str, options: &[String], selected: Option<&str>) -> Markup {
    let unlisted = selected.filter(|value| !options.iter().any(|option| option == value));
    html! {
        select name=(name) {
            @if let Some(value) = unlisted {
                option value=(value) selected { (value) }
            }
            @for option in options {
                option value=(option) selected[selected == Some(option.as_str())] { (option) }
            }
        }
    }
}

fn evaluation_panel(domains: &[DomainView], tools: &[String]) -> Markup {
    html! {
        section class="dp-card" {
            h1 { "Evaluation" }
            @if domains.is_empty() {
                p class="dp-muted" { "Add a domain before recording valuations." }
            } @else {
                form id="evaluation-form" class="dp-form inline"
                    hx-post="/api/evaluations"
                    hx-swap="none" {
                    label { "Domain"
                        select name="domainId" {
                            @for domain in domains {
                                option value=(domain.id) { (domain.name) }
                            }
                        }
                    }
                    label { "Tool" (select_field("tool", tools, None)) }
                    label { "Date" input type="date" name="date" required; }
                    label { "Value" input type="number" name="value" min="0" step="0.01" required; }
                    button type="submit" class="dp-btn primary" { "Record valuation" }
                }
            }
        }
        div class="dp-grid two" {
            @for domain in domains {
                section class="dp-card" {
                    h2 { (domain.name) }
                    p class="dp-muted" {
                        "Bought for $" (domain.purchase_price) ", currently valued at $" (domain.current_value)
                    }
                    @if domain.evaluations.is_empty() {
                        p class="dp-muted" { "No valuations yet." }
                    } @else {
                        table class="dp-table" {
                            thead { tr { th { "Tool" } th { "Date" } th { "Value" } } }
                            tbody {
                                @for evaluation in &domain.evaluations {
                                    tr {
                                        td { (evaluation.tool) }
                                        td { (evaluation.date) }
                                        td { "$" (evaluation.value) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn statistics_panel(
    stats: &PortfolioStats,
    categories: &[CategorySummary],
    top_domains: &[DomainView],
    sales: &[SaleView],
) -> Markup {
    html! {
        h1 { "Statistics" }
        (stat_cards(stats))
        div class="dp-grid two" {
            section class="dp-card" {
                h2 { "By category" }
                @if categories.is_empty() {
                    p class="dp-muted" { "No domains yet." }
                } @else {
                    table class="dp-table" {
                        thead { tr { th { "Category" } th { "Domains" } th { "Investment" } th { "Value" } } }
                        tbody {
                            @for row in categories {
                                tr {
                                    td { (row.category) }
                                    td { (row.domains) }
                                    td { "$" (row.investment) }
                                    td { "$" (row.value) }
                                }
                            }
                        }
                    }
                }
            }
            section class="dp-card" {
                h2 { "Most valuable" }
                @if top_domains.is_empty() {
                    p class="dp-muted" { "No domains yet." }
                } @else {
                    ol class="dp-ranked" {
                        @for domain in top_domains {
                            li { (domain.name) span class="dp-muted" { " $" (domain.current_value) } }
                        }
                    }
                }
            }
        }
        section class="dp-card" {
            h2 { "Sales history" }
            (sales_table(sales))
        }
    }
}

fn sales_panel(sales: &[SaleView], total: &str) -> Markup {
    html! {
        section class="dp-card" {
            h1 { "Sales" }
            form id="sale-form" class="dp-form inline"
                hx-post="/api/sales"
                hx-swap="none" {
                label { "Domain" input type="text" name="domainName" required; }
                label { "Sale date" input type="date" name="saleDate" required; }
                label { "Sale price" input type="number" name="salePrice" min="0" step="0.01" required; }
                label { "Buyer" input type="text" name="buyer"; }
                label { "Purchase price" input type="number" name="purchasePrice" min="0" step="0.01"; }
                button type="submit" class="dp-btn primary" { "Record sale" }
            }
        }
        section class="dp-card" {
            h2 { "History" span class="dp-muted" { " total $" (total) } }
            (sales_table(sales))
        }
    }
}

fn sales_table(sales: &[SaleView]) -> Markup {
    html! {
        @if sales.is_empty() {
            p class="dp-muted" { "No sales recorded." }
        } @else {
            table class="dp-table" {
                thead {
                    tr { th { "Domain" } th { "Date" } th { "Buyer" } th { "Price" } th { "Cost" } th { "Profit" } }
                }
                tbody {
                    @for sale in sales {
                        tr {
                            td { (sale.domain_name) }
                            td { (sale.sale_date) }
                            td { (sale.buyer) }
                            td { "$" (sale.sale_price) }
                            td { "$" (sale.purchase_price) }
                            td { "$" (sale.profit) }
                        }
                    }
                }
            }
        }
    }
}

fn settings_panel(settings: &SettingsCatalog) -> Markup {
    html! {
        h1 { "Settings" }
        div class="dp-grid three" {
            @for kind in SettingsList::ALL {
                section class="dp-card" id={(format!("settings-{}", kind.as_str()))} {
                    h2 { (kind.label()) }
                    ul class="dp-chips" {
                        @for value in settings.list(kind) {
                            li class="dp-chip" {
                                span { (value) }
                                form hx-post="/api/settings/remove" hx-swap="none" {
                                    input type="hidden" name="type" value=(kind.as_str());
                                    input type="hidden" name="value" value=(value);
                                    button type="submit" class="dp-btn subtle" title="Remove" { "×" }
                                }
                            }
                        }
                    }
                    form class="dp-form inline" hx-post="/api/settings" hx-swap="none" {
                        input type="hidden" name="type" value=(kind.as_str());
                        input type="text" name="value" placeholder="New value" required;
                        button type="submit" class="dp-btn primary" { "Add" }
                    }
                }
            }
        }
    }
}

fn styles() -> &'static str {
    r#"
:root {
  color-scheme: light;
  --bg: #f4f6fb;
  --panel: #ffffff;
  --panel-border: #dde3ee;
  --text: #1c2333;
  --muted: #6b7489;
  --accent: #2f6fed;
  --danger: #d64550;
}
* { box-sizing: border-box; }
html, body { margin: 0; min-height: 100%; background: var(--bg); color: var(--text); }
body { font-family: "Inter", "IBM Plex Sans", -apple-system, BlinkMacSystemFont, sans-serif; }
.dp-app { min-height: 100vh; display: flex; flex-direction: column; }
.dp-topbar {
  display: flex;
  gap: 1.5rem;
  align-items: center;
  padding: 0.8rem 1.2rem;
  background: var(--panel);
  border-bottom: 1px solid var(--panel-border);
}
.dp-brand { font-weight: 700; letter-spacing: 0.02em; }
.dp-nav { display: flex; gap: 0.4rem; flex-wrap: wrap; }
.dp-nav-link { color: var(--muted); text-decoration: none; padding: 0.35rem 0.6rem; border-radius: 8px; }
.dp-nav-link:hover { color: var(--text); background: var(--bg); }
.dp-nav-link.active { color: var(--accent); background: #e8efff; }
.dp-main { width: 100%; max-width: 1280px; margin: 0 auto; padding: 1rem; display: grid; gap: 1rem; }
.dp-card { background: var(--panel); border: 1px solid var(--panel-border); border-radius: 12px; padding: 1rem; }
.dp-card h1, .dp-card h2 { margin-top: 0; }
.dp-grid { display: grid; gap: 1rem; }
.dp-grid.two { grid-template-columns: repeat(2, minmax(0, 1fr)); }
.dp-grid.three { grid-template-columns: repeat(3, minmax(0, 1fr)); }
.dp-grid.stats { grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); }
.dp-stat { display: grid; gap: 0.3rem; }
.dp-stat-label { color: var(--muted); font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; }
.dp-stat-value { font-size: 1.4rem; font-weight: 600; }
.dp-table { width: 100%; border-collapse: collapse; margin-bottom: 0.8rem; }
.dp-table th, .dp-table td { text-align: left; padding: 0.45rem 0.5rem; border-bottom: 1px solid var(--panel-border); }
.dp-table th { color: var(--muted); font-size: 0.8rem; font-weight: 500; }
.dp-actions { display: flex; gap: 0.4rem; align-items: flex-start; }
.dp-badge { background: #eef1f7; border-radius: 999px; padding: 0.15rem 0.55rem; font-size: 0.8rem; }
.dp-form { display: grid; gap: 0.55rem; margin: 0.6rem 0; }
.dp-form.inline { grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); align-items: end; }
label { display: grid; gap: 0.25rem; font-size: 0.8rem; color: var(--muted); }
input, select {
  width: 100%;
  border: 1px solid var(--panel-border);
  border-radius: 8px;
  padding: 0.45rem 0.55rem;
  font: inherit;
  color: var(--text);
  background: #fbfcfe;
}
.dp-btn {
  display: inline-block;
  border: 1px solid var(--panel-border);
  border-radius: 8px;
  background: var(--panel);
  color: var(--text);
  padding: 0.45rem 0.75rem;
  font: inherit;
  text-decoration: none;
  cursor: pointer;
}
.dp-btn.primary { background: var(--accent); border-color: var(--accent); color: #fff; }
.dp-btn.danger { color: var(--danger); }
.dp-btn.subtle { background: transparent; }
.dp-chips { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: 0.4rem; }
.dp-chip { display: flex; align-items: center; gap: 0.2rem; background: #eef1f7; border-radius: 999px; padding: 0.1rem 0.2rem 0.1rem 0.65rem; }
.dp-chip form { margin: 0; }
.dp-chip .dp-btn { border: none; padding: 0.1rem 0.4rem; }
.dp-ranked { margin: 0; padding-left: 1.2rem; display: grid; gap: 0.3rem; }
.dp-muted { color: var(--muted); }
.dp-message { max-width: 520px; margin: 4rem auto; text-align: center; }
@media (max-width: 900px) {
  .dp-grid.two, .dp-grid.three { grid-template-columns: 1fr; }
}
"#
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use portfolio_domain::{NewDomain, NewSale, compute_stats};
    use rust_decimal::Decimal;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn domain(id: u64, name: &str) -> DomainAsset {
        DomainAsset::new(
            id,
            NewDomain {
                name: name.to_string(),
                registrar: "Dynadot".to_string(),
                category: "Finance".to_string(),
                purchase_date: date(2023, 1, 15),
                status: "Parked".to_string(),
                purchase_price: Decimal::new(999, 2),
            },
        )
    }

    fn sale() -> SaleRecord {
        SaleRecord::new(
            1,
            NewSale {
                domain_name: "gone.com".to_string(),
                sale_date: date(2023, 6, 1),
                sale_price: Decimal::new(100, 0),
                buyer: "Acme".to_string(),
                purchase_price: Decimal::new(10, 0),
            },
        )
    }

    #[test]
    fn render_page_marks_the_active_nav_link_and_loads_htmx() {
        let html = render_page(&WebPage::settings(SettingsCatalog::default()));
        assert!(html.contains(&format!("src=\"{HTMX_ASSET_PATH}\"")));
        assert!(html.contains("class=\"dp-nav-link active\" href=\"/settings\""));
        assert!(html.contains("class=\"dp-nav-link\" href=\"/\""));
        assert!(html.contains("<title>Settings | Domain Portfolio</title>"));
    }

    #[test]
    fn dashboard_shows_stats_and_recent_records() {
        let domains = [domain(1, "alpha.com"), domain(2, "beta.com")];
        let sales = [sale()];
        let stats = compute_stats(&domains, &sales);
        let html = render_page(&WebPage::dashboard(&domains, &sales, stats));
        assert!(html.contains("alpha.com"));
        assert!(html.contains("beta.com"));
        assert!(html.contains("gone.com"));
        assert!(html.contains("$19.98"));
        assert!(html.contains("$90.00"));
    }

    #[test]
    fn domain_page_escapes_user_text() {
        let html = render_page(&WebPage::domains(
            &[domain(7, "<script>x</script>.com")],
            SettingsCatalog::default(),
        ));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;.com"));
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("hx-put=\"/api/domains/7\""));
        assert!(html.contains("hx-delete=\"/api/domains/7\""));
    }

    #[test]
    fn select_field_keeps_values_missing_from_the_catalog() {
        let options = vec!["GoDaddy".to_string()];
        let html = select_field("registrar", &options, Some("Gandi")).into_string();
        assert!(html.contains("<option value=\"Gandi\" selected>Gandi</option>"));
        assert!(html.contains("<option value=\"GoDaddy\">GoDaddy</option>"));
    }

    #[test]
    fn settings_page_renders_add_and_remove_forms_per_list() {
        let settings = SettingsCatalog {
            registrars: vec!["Porkbun".to_string()],
            categories: vec!["Blog".to_string()],
            evaluation_tools: vec!["Atom".to_string()],
        };
        let html = render_page(&WebPage::settings(settings));
        for kind in SettingsList::ALL {
            assert!(html.contains(&format!("id=\"settings-{}\"", kind.as_str())));
        }
        assert!(html.contains("hx-post=\"/api/settings/remove\""));
        assert!(html.contains("value=\"evaluationTools\""));
    }

    #[test]
    fn statistics_ranks_domains_by_current_value() {
        let cheap = domain(1, "cheap.com");
        let mut pricey = domain(2, "pricey.com");
        pricey.purchase_price = Decimal::new(500, 0);
        let domains = [cheap, pricey];
        let page = WebPage::statistics(&domains, &[], compute_stats(&domains, &[]), Vec::new());
        let names: Vec<String> = match &page.body {
            WebBody::Statistics { top_domains, .. } => {
                top_domains.iter().map(|domain| domain.name.clone()).collect()
            }
            _ => Vec::new(),
        };
        assert_eq!(names, vec!["pricey.com", "cheap.com"]);
    }

    #[test]
    fn message_pages_link_back_to_the_dashboard() {
        for html in [render_not_found_page(), render_server_error_page()] {
            assert!(html.contains("href=\"/\""));
            assert!(html.contains("Go back to Dashboard"));
        }
        assert!(render_not_found_page().contains("Page Not Found"));
        assert!(render_server_error_page().contains("Server Error"));
    }
}

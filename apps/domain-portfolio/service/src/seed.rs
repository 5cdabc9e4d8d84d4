//! Records loaded into a fresh store at process start.

use chrono::NaiveDate;
use portfolio_domain::{DomainAsset, Evaluation, NewDomain, NewSale, SaleRecord, SettingsCatalog};
use rust_decimal::Decimal;

pub struct PortfolioSeed {
    pub domains: Vec<DomainAsset>,
    pub sales: Vec<SaleRecord>,
    pub settings: SettingsCatalog,
}

impl PortfolioSeed {
    pub fn empty() -> Self {
        Self {
            domains: Vec::new(),
            sales: Vec::new(),
            settings: SettingsCatalog::default(),
        }
    }

    pub fn starter() -> Self {
        Self {
            domains: vec![
                seeded_domain(1, "example.com", "GoDaddy", "Tech", (2023, 1, 15), "Active", 1299, ("GoDaddy", (2023, 2, 1), 150)),
                seeded_domain(2, "mybusiness.net", "Namecheap", "Business", (2023, 3, 10), "For Sale", 1599, ("Atom", (2023, 4, 1), 200)),
                seeded_domain(3, "techstartup.io", "Cloudflare", "Tech", (2023, 5, 20), "Active", 2500, ("DNRater", (2023, 6, 1), 300)),
            ],
            sales: vec![
                seeded_sale(1, "sold-domain.com", (2023, 6, 15), 500, "John Doe", 1299),
                seeded_sale(2, "premium-name.org", (2023, 8, 22), 1200, "Tech Corp", 1899),
            ],
            settings: SettingsCatalog {
                registrars: strings(&["GoDaddy", "Namecheap", "Google Domains", "Cloudflare", "Porkbun", "Dynadot"]),
                categories: strings(&["Tech", "Business", "E-commerce", "Blog", "Portfolio", "Finance", "Health", "Education"]),
                evaluation_tools: strings(&["Atom", "DNRater", "GoDaddy", "Estibot", "NameBio", "Other"]),
            },
        }
    }
}

type Ymd = (i32, u32, u32);

fn ymd((year, month, day): Ymd) -> NaiveDate {
    // Seed literals are valid calendar dates.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[expect(clippy::too_many_arguments)]
fn seeded_domain(
    id: u64,
    name: &str,
    registrar: &str,
    category: &str,
    purchase_date: Ymd,
    status: &str,
    price_cents: i64,
    (tool, evaluated_on, value): (&str, Ymd, i64),
) -> DomainAsset {
    let mut domain = DomainAsset::new(
        id,
        NewDomain {
            name: name.to_string(),
            registrar: registrar.to_string(),
            category: category.to_string(),
            purchase_date: ymd(purchase_date),
            status: status.to_string(),
            purchase_price: Decimal::new(price_cents, 2),
        },
    );
    domain.evaluations.push(Evaluation {
        tool: tool.to_string(),
        date: ymd(evaluated_on),
        value: Decimal::new(value, 0),
    });
    domain
}

fn seeded_sale(
    id: u64,
    domain_name: &str,
    sale_date: Ymd,
    sale_price: i64,
    buyer: &str,
    purchase_cents: i64,
) -> SaleRecord {
    SaleRecord::new(
        id,
        NewSale {
            domain_name: domain_name.to_string(),
            sale_date: ymd(sale_date),
            sale_price: Decimal::new(sale_price, 0),
            buyer: buyer.to_string(),
            purchase_price: Decimal::new(purchase_cents, 2),
        },
    )
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use portfolio_domain::{compute_stats, format_date};

    use super::*;

    #[test]
    fn starter_seed_matches_documented_records() {
        let seed = PortfolioSeed::starter();
        assert_eq!(seed.domains.len(), 3);
        assert_eq!(seed.sales.len(), 2);

        let expirations: Vec<String> = seed
            .domains
            .iter()
            .map(|domain| format_date(domain.expiration_date))
            .collect();
        assert_eq!(expirations, vec!["2023-12-15", "2024-02-10", "2024-04-20"]);

        assert_eq!(seed.settings.registrars.len(), 6);
        assert_eq!(seed.settings.categories.len(), 8);
        assert_eq!(seed.settings.evaluation_tools.len(), 6);
    }

    #[test]
    fn starter_seed_stats() {
        let seed = PortfolioSeed::starter();
        let stats = compute_stats(&seed.domains, &seed.sales);
        assert_eq!(stats.total_investment, "53.98");
        assert_eq!(stats.total_sales, "1700.00");
        assert_eq!(stats.total_value, "650.00");
        assert_eq!(stats.roi, "3049.31");
    }
}

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::{DomainAsset, SaleRecord};

/// Portfolio-wide totals. Monetary fields are pre-formatted with two
/// decimals; accumulation happens at full precision before rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_domains: usize,
    pub sold_domains: usize,
    pub total_value: String,
    pub roi: String,
    pub total_investment: String,
    pub total_sales: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub domains: usize,
    pub investment: String,
    pub value: String,
}

/// Latest evaluation value, falling back to the purchase price.
pub fn current_value(domain: &DomainAsset) -> Decimal {
    domain
        .latest_evaluation()
        .map_or(domain.purchase_price, |evaluation| evaluation.value)
}

pub fn compute_stats(domains: &[DomainAsset], sales: &[SaleRecord]) -> PortfolioStats {
    let total_investment = sum_money(domains.iter().map(|domain| domain.purchase_price));
    let total_sales = sum_money(sales.iter().map(|sale| sale.sale_price));
    let total_value = sum_money(domains.iter().map(current_value));

    PortfolioStats {
        total_domains: domains.len(),
        sold_domains: sales.len(),
        total_value: format_money(total_value),
        roi: format_money(roi_percent(sales.is_empty(), total_sales, total_investment)),
        total_investment: format_money(total_investment),
        total_sales: format_money(total_sales),
    }
}

/// Per-category counts and totals, ordered by category name.
pub fn category_breakdown(domains: &[DomainAsset]) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<&str, (usize, Decimal, Decimal)> = BTreeMap::new();
    for domain in domains {
        let entry = groups
            .entry(domain.category.as_str())
            .or_insert((0, Decimal::ZERO, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(domain.purchase_price);
        entry.2 = entry.2.saturating_add(current_value(domain));
    }

    groups
        .into_iter()
        .map(|(category, (count, investment, value))| CategorySummary {
            category: category.to_string(),
            domains: count,
            investment: format_money(investment),
            value: format_money(value),
        })
        .collect()
}

/// Zero until something has been sold, and when nothing was invested.
fn roi_percent(no_sales: bool, total_sales: Decimal, total_investment: Decimal) -> Decimal {
    if no_sales || total_investment.is_zero() {
        return Decimal::ZERO;
    }
    total_sales
        .checked_sub(total_investment)
        .and_then(|gain| gain.checked_div(total_investment))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Adds amounts, pinning at `Decimal::MAX`/`MIN` instead of overflowing.
pub fn sum_money(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{Evaluation, NewDomain, NewSale};

    fn purchase_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 15).expect("valid date")
    }

    fn domain(id: u64, category: &str, price: i64) -> DomainAsset {
        DomainAsset::new(
            id,
            NewDomain {
                name: format!("d{id}.com"),
                registrar: "GoDaddy".to_string(),
                category: category.to_string(),
                purchase_date: purchase_date(),
                status: "Active".to_string(),
                purchase_price: Decimal::new(price, 0),
            },
        )
    }

    fn sale(price: i64) -> SaleRecord {
        SaleRecord::new(
            1,
            NewSale {
                domain_name: "sold.com".to_string(),
                sale_date: purchase_date(),
                sale_price: Decimal::new(price, 0),
                buyer: "Buyer".to_string(),
                purchase_price: Decimal::ZERO,
            },
        )
    }

    #[test]
    fn empty_portfolio_reports_zeroes() {
        let stats = compute_stats(&[], &[]);
        assert_eq!(stats.total_domains, 0);
        assert_eq!(stats.sold_domains, 0);
        assert_eq!(stats.total_value, "0.00");
        assert_eq!(stats.roi, "0.00");
        assert_eq!(stats.total_investment, "0.00");
        assert_eq!(stats.total_sales, "0.00");
    }

    #[test]
    fn roi_is_zero_before_any_sale() {
        let domains = [domain(1, "Tech", 10), domain(2, "Tech", 20)];
        let stats = compute_stats(&domains, &[]);
        assert_eq!(stats.total_investment, "30.00");
        assert_eq!(stats.total_sales, "0.00");
        assert_eq!(stats.roi, "0.00");
    }

    #[test]
    fn roi_goes_negative_when_sales_trail_investment() {
        let domains = [domain(1, "Tech", 100)];
        let stats = compute_stats(&domains, &[sale(25)]);
        assert_eq!(stats.roi, "-75.00");
    }

    #[test]
    fn roi_compares_sales_to_investment() {
        let domains = [domain(1, "Tech", 10), domain(2, "Tech", 20)];
        let stats = compute_stats(&domains, &[sale(50)]);
        assert_eq!(stats.total_sales, "50.00");
        assert_eq!(stats.roi, "66.67");
        assert_eq!(stats.sold_domains, 1);
    }

    #[test]
    fn roi_guards_against_zero_investment() {
        let stats = compute_stats(&[domain(1, "Tech", 0)], &[sale(50)]);
        assert_eq!(stats.roi, "0.00");
    }

    #[test]
    fn total_value_prefers_latest_evaluation() {
        let mut evaluated = domain(1, "Tech", 10);
        evaluated.evaluations.push(Evaluation {
            tool: "Atom".to_string(),
            date: purchase_date(),
            value: Decimal::new(100, 0),
        });
        evaluated.evaluations.push(Evaluation {
            tool: "DNRater".to_string(),
            date: purchase_date(),
            value: Decimal::new(2505, 1),
        });
        let plain = domain(2, "Blog", 20);

        let stats = compute_stats(&[evaluated, plain], &[]);
        assert_eq!(stats.total_value, "270.50");
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let mut huge = domain(1, "Tech", 0);
        huge.purchase_price = Decimal::MAX;
        let mut other = domain(2, "Tech", 0);
        other.purchase_price = Decimal::MAX;
        let domains = [huge, other];

        let stats = compute_stats(&domains, &[sale(10)]);
        assert_eq!(stats.total_investment, format_money(Decimal::MAX));
        assert_eq!(stats.roi, "-100.00");

        let categories = category_breakdown(&domains);
        assert_eq!(categories[0].investment, format_money(Decimal::MAX));
        assert_eq!(sum_money([Decimal::MIN, Decimal::MIN]), Decimal::MIN);
    }

    #[test]
    fn money_rounds_half_away_from_zero() {
        assert_eq!(format_money(Decimal::new(12345, 3)), "12.35");
        assert_eq!(format_money(Decimal::new(-12345, 3)), "-12.35");
        assert_eq!(format_money(Decimal::new(5, 0)), "5.00");
    }

    #[test]
    fn category_breakdown_groups_by_name() {
        let domains = [
            domain(1, "Tech", 10),
            domain(2, "Business", 5),
            domain(3, "Tech", 20),
        ];
        let rows = category_breakdown(&domains);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Business");
        assert_eq!(rows[1].category, "Tech");
        assert_eq!(rows[1].domains, 2);
        assert_eq!(rows[1].investment, "30.00");
    }
}

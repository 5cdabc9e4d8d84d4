use std::sync::Arc;

use portfolio_domain::{
    CategorySummary, DomainAsset, DomainPatch, Evaluation, NewDomain, NewSale, PortfolioStats,
    SaleRecord, SettingsCatalog, SettingsList, category_breakdown, compute_stats,
};
use tokio::sync::RwLock;

use crate::seed::PortfolioSeed;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PortfolioStoreError {
    #[error("domain {id} not found")]
    DomainNotFound { id: u64 },
}

/// Shared handle over every in-memory collection. Clones share state.
#[derive(Clone)]
pub struct PortfolioStore {
    state: Arc<RwLock<PortfolioState>>,
}

#[derive(Debug, Clone)]
struct PortfolioState {
    domains: Vec<DomainAsset>,
    sales: Vec<SaleRecord>,
    settings: SettingsCatalog,
    next_domain_id: u64,
    next_sale_id: u64,
}

/// Read-only copy of the collections, taken under a single read lock.
#[derive(Debug, Clone)]
pub struct PortfolioSnapshot {
    pub domains: Vec<DomainAsset>,
    pub sales: Vec<SaleRecord>,
    pub settings: SettingsCatalog,
}

impl PortfolioSnapshot {
    pub fn stats(&self) -> PortfolioStats {
        compute_stats(&self.domains, &self.sales)
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        category_breakdown(&self.domains)
    }
}

impl PortfolioState {
    fn from_seed(seed: PortfolioSeed) -> Self {
        let mut state = Self {
            domains: seed.domains,
            sales: seed.sales,
            settings: seed.settings,
            next_domain_id: 1,
            next_sale_id: 1,
        };
        state.normalize_counters();
        state
    }

    fn normalize_counters(&mut self) {
        let max_domain = self.domains.iter().map(|domain| domain.id).max().unwrap_or(0);
        let max_sale = self.sales.iter().map(|sale| sale.id).max().unwrap_or(0);
        self.next_domain_id = self.next_domain_id.max(max_domain.saturating_add(1));
        self.next_sale_id = self.next_sale_id.max(max_sale.saturating_add(1));
    }

    fn insert_domain(&mut self, input: NewDomain) -> DomainAsset {
        let id = self.next_domain_id;
        self.next_domain_id = self.next_domain_id.saturating_add(1);
        let domain = DomainAsset::new(id, input);
        self.domains.push(domain.clone());
        domain
    }

    fn domain_mut(&mut self, id: u64) -> Result<&mut DomainAsset, PortfolioStoreError> {
        self.domains
            .iter_mut()
            .find(|domain| domain.id == id)
            .ok_or(PortfolioStoreError::DomainNotFound { id })
    }
}

impl PortfolioStore {
    pub fn new(seed: PortfolioSeed) -> Self {
        Self {
            state: Arc::new(RwLock::new(PortfolioState::from_seed(seed))),
        }
    }

    pub fn seeded() -> Self {
        Self::new(PortfolioSeed::starter())
    }

    pub async fn snapshot(&self) -> PortfolioSnapshot {
        let state = self.state.read().await;
        PortfolioSnapshot {
            domains: state.domains.clone(),
            sales: state.sales.clone(),
            settings: state.settings.clone(),
        }
    }

    pub async fn list_domains(&self) -> Vec<DomainAsset> {
        self.state.read().await.domains.clone()
    }

    pub async fn find_domain(&self, id: u64) -> Option<DomainAsset> {
        let state = self.state.read().await;
        state.domains.iter().find(|domain| domain.id == id).cloned()
    }

    pub async fn create_domain(&self, input: NewDomain) -> Result<DomainAsset, PortfolioStoreError> {
        let domain = self.mutate(|state| Ok(state.insert_domain(input))).await?;
        tracing::info!(
            target: "domain_portfolio.store",
            domain_id = domain.id,
            name = %domain.name,
            "domain created"
        );
        Ok(domain)
    }

    /// Inserts every input under one write lock, in order.
    pub async fn bulk_create_domains(
        &self,
        inputs: Vec<NewDomain>,
    ) -> Result<Vec<DomainAsset>, PortfolioStoreError> {
        let created = self
            .mutate(|state| {
                Ok(inputs
                    .into_iter()
                    .map(|input| state.insert_domain(input))
                    .collect::<Vec<_>>())
            })
            .await?;
        tracing::info!(
            target: "domain_portfolio.store",
            count = created.len(),
            "domains bulk created"
        );
        Ok(created)
    }

    pub async fn update_domain(
        &self,
        id: u64,
        patch: DomainPatch,
    ) -> Result<DomainAsset, PortfolioStoreError> {
        let result = self
            .mutate(|state| {
                let domain = state.domain_mut(id)?;
                domain.apply_patch(patch);
                Ok(domain.clone())
            })
            .await;
        if let Err(error) = &result {
            tracing::warn!(target: "domain_portfolio.store", domain_id = id, error = %error, "domain update rejected");
        }
        result
    }

    /// Removes the domain if present. Returns whether anything was removed.
    pub async fn delete_domain(&self, id: u64) -> Result<bool, PortfolioStoreError> {
        let removed = self
            .mutate(|state| {
                let before = state.domains.len();
                state.domains.retain(|domain| domain.id != id);
                Ok(state.domains.len() != before)
            })
            .await?;
        tracing::info!(target: "domain_portfolio.store", domain_id = id, removed, "domain delete");
        Ok(removed)
    }

    pub async fn add_evaluation(
        &self,
        domain_id: u64,
        evaluation: Evaluation,
    ) -> Result<(), PortfolioStoreError> {
        let result = self
            .mutate(|state| {
                state.domain_mut(domain_id)?.evaluations.push(evaluation);
                Ok(())
            })
            .await;
        match &result {
            Ok(()) => tracing::info!(target: "domain_portfolio.store", domain_id, "evaluation recorded"),
            Err(error) => tracing::warn!(target: "domain_portfolio.store", domain_id, error = %error, "evaluation rejected"),
        }
        result
    }

    pub async fn list_sales(&self) -> Vec<SaleRecord> {
        self.state.read().await.sales.clone()
    }

    pub async fn create_sale(&self, input: NewSale) -> Result<SaleRecord, PortfolioStoreError> {
        let sale = self
            .mutate(|state| {
                let id = state.next_sale_id;
                state.next_sale_id = state.next_sale_id.saturating_add(1);
                let sale = SaleRecord::new(id, input);
                state.sales.push(sale.clone());
                Ok(sale)
            })
            .await?;
        tracing::info!(
            target: "domain_portfolio.store",
            sale_id = sale.id,
            domain_name = %sale.domain_name,
            "sale recorded"
        );
        Ok(sale)
    }

    pub async fn list_settings(&self) -> SettingsCatalog {
        self.state.read().await.settings.clone()
    }

    /// Adds `value` to the named list. Unknown lists and empty values leave
    /// the catalog unchanged. Returns the catalog after the call.
    pub async fn add_setting(
        &self,
        kind: Option<SettingsList>,
        value: &str,
    ) -> Result<SettingsCatalog, PortfolioStoreError> {
        self.mutate(|state| {
            if let Some(kind) = kind.filter(|_| !value.is_empty()) {
                if state.settings.add(kind, value) {
                    tracing::info!(target: "domain_portfolio.store", list = kind.as_str(), value, "setting added");
                }
            }
            Ok(state.settings.clone())
        })
        .await
    }

    pub async fn remove_setting(
        &self,
        kind: Option<SettingsList>,
        value: &str,
    ) -> Result<SettingsCatalog, PortfolioStoreError> {
        self.mutate(|state| {
            if let Some(kind) = kind {
                let removed = state.settings.remove(kind, value);
                if removed > 0 {
                    tracing::info!(target: "domain_portfolio.store", list = kind.as_str(), value, removed, "setting removed");
                }
            }
            Ok(state.settings.clone())
        })
        .await
    }

    async fn mutate<T, F>(&self, operation: F) -> Result<T, PortfolioStoreError>
    where
        F: FnOnce(&mut PortfolioState) -> Result<T, PortfolioStoreError>,
    {
        let mut state = self.state.write().await;
        operation(&mut state)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn new_domain(name: &str, price: i64) -> NewDomain {
        NewDomain {
            name: name.to_string(),
            registrar: "Porkbun".to_string(),
            category: "Blog".to_string(),
            purchase_date: date(2023, 1, 15),
            status: "Active".to_string(),
            purchase_price: Decimal::new(price, 0),
        }
    }

    #[tokio::test]
    async fn create_domain_assigns_fresh_ids_after_the_seed() -> Result<(), PortfolioStoreError> {
        let store = PortfolioStore::seeded();
        let first = store.create_domain(new_domain("fresh.dev", 10)).await?;
        let second = store.create_domain(new_domain("fresher.dev", 11)).await?;

        assert_eq!(first.id, 4);
        assert_eq!(second.id, 5);
        assert_eq!(first.expiration_date, date(2023, 12, 15));
        assert!(first.evaluations.is_empty());
        assert_eq!(store.list_domains().await.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() -> Result<(), PortfolioStoreError> {
        let store = PortfolioStore::new(PortfolioSeed::empty());
        let created = store.create_domain(new_domain("a.com", 1)).await?;
        assert!(store.delete_domain(created.id).await?);
        let again = store.create_domain(new_domain("b.com", 1)).await?;
        assert_ne!(created.id, again.id);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> Result<(), PortfolioStoreError> {
        let store = PortfolioStore::seeded();
        assert!(store.delete_domain(2).await?);
        assert!(!store.delete_domain(2).await?);
        assert!(store.find_domain(2).await.is_none());
        assert_eq!(store.list_domains().await.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_fields_and_reports_missing_ids() -> Result<(), PortfolioStoreError> {
        let store = PortfolioStore::seeded();
        let updated = store
            .update_domain(
                1,
                DomainPatch {
                    status: Some("For Sale".to_string()),
                    purchase_price: Some(Decimal::new(20, 0)),
                    ..DomainPatch::default()
                },
            )
            .await?;
        assert_eq!(updated.name, "example.com");
        assert_eq!(updated.status, "For Sale");
        assert_eq!(updated.purchase_price, Decimal::new(20, 0));
        assert_eq!(updated.evaluations.len(), 1);

        let missing = store.update_domain(99, DomainPatch::default()).await;
        assert_eq!(missing, Err(PortfolioStoreError::DomainNotFound { id: 99 }));
        Ok(())
    }

    #[tokio::test]
    async fn evaluation_on_unknown_domain_changes_nothing() {
        let store = PortfolioStore::seeded();
        let before = store.list_domains().await;
        let result = store
            .add_evaluation(
                42,
                Evaluation {
                    tool: "Atom".to_string(),
                    date: date(2024, 1, 1),
                    value: Decimal::new(10, 0),
                },
            )
            .await;
        assert_eq!(result, Err(PortfolioStoreError::DomainNotFound { id: 42 }));
        assert_eq!(store.list_domains().await, before);
    }

    #[tokio::test]
    async fn evaluation_appends_and_moves_current_value() -> Result<(), PortfolioStoreError> {
        let store = PortfolioStore::seeded();
        store
            .add_evaluation(
                1,
                Evaluation {
                    tool: "Estibot".to_string(),
                    date: date(2024, 1, 1),
                    value: Decimal::new(400, 0),
                },
            )
            .await?;
        let domain = store.find_domain(1).await;
        assert_eq!(domain.map(|domain| domain.evaluations.len()), Some(2));
        assert_eq!(store.snapshot().await.stats().total_value, "900.00");
        Ok(())
    }

    #[tokio::test]
    async fn settings_add_is_deduplicated_and_unknown_lists_are_ignored()
    -> Result<(), PortfolioStoreError> {
        let store = PortfolioStore::seeded();
        let kind = SettingsList::from_name("categories");
        store.add_setting(kind, "NewCat").await?;
        let settings = store.add_setting(kind, "NewCat").await?;
        assert_eq!(
            settings.categories.iter().filter(|value| *value == "NewCat").count(),
            1
        );

        let unchanged = store.add_setting(SettingsList::from_name("colors"), "Red").await?;
        assert_eq!(unchanged, settings);

        let empty = store.add_setting(kind, "").await?;
        assert_eq!(empty, settings);

        let removed = store.remove_setting(kind, "NewCat").await?;
        assert!(!removed.categories.contains(&"NewCat".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn bulk_create_appends_in_order() -> Result<(), PortfolioStoreError> {
        let store = PortfolioStore::seeded();
        let created = store
            .bulk_create_domains(vec![new_domain("one.io", 1), new_domain("two.io", 2)])
            .await?;
        let ids: Vec<u64> = created.iter().map(|domain| domain.id).collect();
        assert_eq!(ids, vec![4, 5]);
        let names: Vec<String> = store
            .list_domains()
            .await
            .into_iter()
            .map(|domain| domain.name)
            .collect();
        assert_eq!(names[3..], ["one.io".to_string(), "two.io".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn create_sale_continues_the_seeded_sequence() -> Result<(), PortfolioStoreError> {
        let store = PortfolioStore::seeded();
        let sale = store
            .create_sale(NewSale {
                domain_name: "not-in-portfolio.com".to_string(),
                sale_date: date(2024, 3, 1),
                sale_price: Decimal::new(75, 0),
                buyer: "Someone".to_string(),
                purchase_price: Decimal::ZERO,
            })
            .await?;
        assert_eq!(sale.id, 3);
        assert_eq!(store.list_sales().await.len(), 3);
        assert_eq!(store.snapshot().await.stats().sold_domains, 3);
        Ok(())
    }

    #[tokio::test]
    async fn snapshot_reflects_every_collection() {
        let store = PortfolioStore::seeded();
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.domains.len(), 3);
        assert_eq!(snapshot.sales.len(), 2);
        assert_eq!(snapshot.stats().total_investment, "53.98");
        assert_eq!(snapshot.categories().len(), 2);
    }
}

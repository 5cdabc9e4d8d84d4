use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::expiration_date;

/// A valuation snapshot attached to a domain. Owned by its parent asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub tool: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAsset {
    pub id: u64,
    pub name: String,
    pub registrar: String,
    pub category: String,
    pub purchase_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: u64,
    pub domain_name: String,
    pub sale_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_price: Decimal,
    pub buyer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDomain {
    pub name: String,
    pub registrar: String,
    pub category: String,
    pub purchase_date: NaiveDate,
    pub status: String,
    pub purchase_price: Decimal,
}

/// Field-by-field overwrite for an existing asset. `None` leaves the stored
/// value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainPatch {
    pub name: Option<String>,
    pub registrar: Option<String>,
    pub category: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub purchase_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub domain_name: String,
    pub sale_date: NaiveDate,
    pub sale_price: Decimal,
    pub buyer: String,
    pub purchase_price: Decimal,
}

impl DomainAsset {
    pub fn new(id: u64, input: NewDomain) -> Self {
        Self {
            id,
            name: input.name,
            registrar: input.registrar,
            category: input.category,
            purchase_date: input.purchase_date,
            expiration_date: expiration_date(input.purchase_date),
            status: input.status,
            purchase_price: input.purchase_price,
            evaluations: Vec::new(),
        }
    }

    /// Merges `patch` over the record and re-derives the expiration date from
    /// the merged purchase date. The id and evaluation history never change.
    pub fn apply_patch(&mut self, patch: DomainPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(registrar) = patch.registrar {
            self.registrar = registrar;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(purchase_date) = patch.purchase_date {
            self.purchase_date = purchase_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(purchase_price) = patch.purchase_price {
            self.purchase_price = purchase_price;
        }
        self.expiration_date = expiration_date(self.purchase_date);
    }

    pub fn latest_evaluation(&self) -> Option<&Evaluation> {
        self.evaluations.last()
    }
}

impl SaleRecord {
    pub fn new(id: u64, input: NewSale) -> Self {
        Self {
            id,
            domain_name: input.domain_name,
            sale_date: input.sale_date,
            sale_price: input.sale_price,
            buyer: input.buyer,
            purchase_price: input.purchase_price,
        }
    }

    pub fn profit(&self) -> Decimal {
        self.sale_price.saturating_sub(self.purchase_price)
    }
}

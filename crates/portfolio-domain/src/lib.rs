//! Records and pure rules for a domain-name portfolio.
//!
//! Nothing in this crate holds state or does I/O. The service crate owns the
//! in-memory collections and calls into these types for parsing request
//! input, deriving expiration dates and aggregating statistics.

pub mod dates;
pub mod model;
pub mod parse;
pub mod settings;
pub mod stats;

pub use dates::{EXPIRATION_TERM_MONTHS, expiration_date, format_date};
pub use model::{DomainAsset, DomainPatch, Evaluation, NewDomain, NewSale, SaleRecord};
pub use parse::{AmountInput, IdInput, ParseError};
pub use settings::{SettingsCatalog, SettingsList};
pub use stats::{
    CategorySummary, PortfolioStats, category_breakdown, compute_stats, current_value, format_money,
    sum_money,
};

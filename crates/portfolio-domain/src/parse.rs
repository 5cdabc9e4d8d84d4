use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::parse_date_text;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ParseError {
    pub field: &'static str,
    pub message: String,
}

impl ParseError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A numeric field as it arrives over the wire: JSON forms send numbers,
/// HTML forms send text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(number) => decimal_from_text(&number.to_string()),
            Self::Text(text) => decimal_from_text(text),
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn decimal_from_text(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Largest magnitude accepted for any single amount. Totals over the whole
/// portfolio then stay far inside `Decimal`'s range.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

fn within_limit(value: Decimal) -> bool {
    value.abs() <= Decimal::from(MAX_AMOUNT_UNITS)
}

pub fn required_amount(
    field: &'static str,
    input: Option<&AmountInput>,
) -> Result<Decimal, ParseError> {
    let input = input.ok_or_else(|| ParseError::new(field, "is required"))?;
    let value = input
        .to_decimal()
        .ok_or_else(|| ParseError::new(field, "must be a decimal number"))?;
    if !within_limit(value) {
        return Err(ParseError::new(
            field,
            format!("must not exceed {MAX_AMOUNT_UNITS} in magnitude"),
        ));
    }
    Ok(value)
}

pub fn non_negative_amount(
    field: &'static str,
    input: Option<&AmountInput>,
) -> Result<Decimal, ParseError> {
    let value = required_amount(field, input)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ParseError::new(field, "must not be negative"));
    }
    Ok(value)
}

/// Missing, unparseable or out-of-range input falls back to zero.
pub fn amount_or_zero(input: Option<&AmountInput>) -> Decimal {
    input
        .and_then(AmountInput::to_decimal)
        .filter(|value| within_limit(*value))
        .unwrap_or(Decimal::ZERO)
}

pub fn required_date(field: &'static str, input: Option<&str>) -> Result<NaiveDate, ParseError> {
    let raw = input
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ParseError::new(field, "is required"))?;
    parse_date_text(raw).ok_or_else(|| ParseError::new(field, "must be a YYYY-MM-DD date"))
}

pub fn optional_date(
    field: &'static str,
    input: Option<&str>,
) -> Result<Option<NaiveDate>, ParseError> {
    match input {
        None => Ok(None),
        Some(raw) => required_date(field, Some(raw)).map(Some),
    }
}

pub fn optional_amount(
    field: &'static str,
    input: Option<&AmountInput>,
) -> Result<Option<Decimal>, ParseError> {
    match input {
        None => Ok(None),
        Some(_) => non_negative_amount(field, input).map(Some),
    }
}

pub fn normalize_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// A record id as it arrives in a body: a JSON number or the text of a
/// `<select>` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(u64),
    Text(String),
}

impl IdInput {
    /// `None` for text that is not a whole non-negative number.
    pub fn to_id(&self) -> Option<u64> {
        match self {
            Self::Number(id) => Some(*id),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn json_amount(raw: &str) -> Result<AmountInput, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[test]
    fn amount_input_accepts_numbers_and_numeric_text() -> Result<(), serde_json::Error> {
        assert_eq!(
            json_amount("12.99")?.to_decimal(),
            Some(Decimal::new(1299, 2))
        );
        assert_eq!(json_amount("\" 25 \"")?.to_decimal(), Some(Decimal::new(25, 0)));
        assert_eq!(json_amount("\"abc\"")?.to_decimal(), None);
        assert_eq!(json_amount("\"\"")?.to_decimal(), None);
        Ok(())
    }

    #[test]
    fn required_amount_reports_the_field() {
        let missing = required_amount("salePrice", None);
        assert_eq!(missing, Err(ParseError::new("salePrice", "is required")));

        let garbage = AmountInput::from("twelve");
        let error = required_amount("salePrice", Some(&garbage)).err();
        assert_eq!(
            error.map(|error| error.to_string()),
            Some("salePrice: must be a decimal number".to_string())
        );
    }

    #[test]
    fn non_negative_amount_rejects_negative_prices() {
        let negative = AmountInput::from("-1.50");
        assert!(non_negative_amount("purchasePrice", Some(&negative)).is_err());
        let zero = AmountInput::from("0");
        assert_eq!(
            non_negative_amount("purchasePrice", Some(&zero)),
            Ok(Decimal::ZERO)
        );
    }

    #[test]
    fn amounts_beyond_the_limit_are_rejected() {
        let huge = AmountInput::from("79228162514264337593543950335");
        let error = required_amount("purchasePrice", Some(&huge)).err();
        assert_eq!(error.map(|error| error.field), Some("purchasePrice"));
        assert!(non_negative_amount("salePrice", Some(&huge)).is_err());
        assert_eq!(amount_or_zero(Some(&huge)), Decimal::ZERO);

        let limit = AmountInput::from("1000000000000");
        assert_eq!(
            required_amount("value", Some(&limit)),
            Ok(Decimal::from(MAX_AMOUNT_UNITS))
        );
        let negative_limit = AmountInput::from("-1000000000000.01");
        assert!(required_amount("value", Some(&negative_limit)).is_err());
    }

    #[test]
    fn amount_or_zero_swallows_bad_input() {
        let garbage = AmountInput::from("n/a");
        assert_eq!(amount_or_zero(Some(&garbage)), Decimal::ZERO);
        assert_eq!(amount_or_zero(None), Decimal::ZERO);
        let valid = AmountInput::from("18.99");
        assert_eq!(amount_or_zero(Some(&valid)), Decimal::new(1899, 2));
    }

    #[test]
    fn id_input_reads_numbers_and_option_text() -> Result<(), serde_json::Error> {
        let number: IdInput = serde_json::from_str("3")?;
        let text: IdInput = serde_json::from_str("\" 4 \"")?;
        let garbage: IdInput = serde_json::from_str("\"four\"")?;
        assert_eq!(number.to_id(), Some(3));
        assert_eq!(text.to_id(), Some(4));
        assert_eq!(garbage.to_id(), None);
        Ok(())
    }

    #[test]
    fn optional_date_distinguishes_absent_from_invalid() {
        assert_eq!(optional_date("purchaseDate", None), Ok(None));
        assert!(optional_date("purchaseDate", Some("not-a-date")).is_err());
        assert!(optional_date("purchaseDate", Some("")).is_err());
    }
}

use chrono::{Months, NaiveDate};

/// Registration term assumed for a freshly purchased domain.
pub const EXPIRATION_TERM_MONTHS: u32 = 11;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Purchase date plus [`EXPIRATION_TERM_MONTHS`] calendar months.
///
/// When the target month is shorter than the purchase day-of-month the result
/// is clamped to the last day of that month, so `2023-03-31` expires on
/// `2024-02-29` rather than rolling into March.
pub fn expiration_date(purchase_date: NaiveDate) -> NaiveDate {
    purchase_date
        .checked_add_months(Months::new(EXPIRATION_TERM_MONTHS))
        .unwrap_or(NaiveDate::MAX)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

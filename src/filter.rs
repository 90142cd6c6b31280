use chrono::NaiveDate;

use crate::record::Record;

/// The trips worth reporting: leaving inside an inclusive date window, at
/// or below a price ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub departure_from: NaiveDate,
    pub departure_to: NaiveDate,
    pub price_ceiling: f64,
}

impl FilterConfig {
    pub fn matches(&self, record: &Record) -> bool {
        matches(record, self)
    }
}

/// Return dates are not checked.
pub fn matches(record: &Record, config: &FilterConfig) -> bool {
    let date_matches =
        (config.departure_from..=config.departure_to).contains(&record.departure_date);
    let price_matches = record.price <= config.price_ceiling;
    date_matches && price_matches
}

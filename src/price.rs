use std::cmp::Ordering;
use std::fmt;

use crate::{error::FlightError, record::Attribute};

/// A ticket price as printed on the results page, e.g. `$250` or `€99.50`.
///
/// Prices only compare against a plain threshold, never against each other,
/// since two prices in different currencies have no meaningful order.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    currency: char,
    amount: f64,
}

impl Price {
    pub fn new(currency: char, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// Parses price-tag text: the first character is the currency code and
    /// the (trimmed) rest is the amount.
    pub fn parse(text: &str) -> Result<Self, FlightError> {
        let trimmed = text.trim();
        let fault = |reason: &str| FlightError::parse(Attribute::Price, trimmed, reason);

        let mut chars = trimmed.chars();
        let Some(currency) = chars.next() else {
            return Err(fault("empty price text"));
        };
        let amount = chars
            .as_str()
            .trim()
            .parse::<f64>()
            .map_err(|err| fault(&err.to_string()))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(fault("amount must be a non-negative number"));
        }

        Ok(Self { currency, amount })
    }

    pub fn currency(&self) -> char {
        self.currency
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl PartialEq<f64> for Price {
    fn eq(&self, other: &f64) -> bool {
        self.amount == *other
    }
}

impl PartialOrd<f64> for Price {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.amount.partial_cmp(other)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency, self.amount)
    }
}

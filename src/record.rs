use std::fmt;

use chrono::NaiveDate;

use crate::price::Price;

/// Format used whenever a trip date is printed for a human.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// The fields scraped independently from a results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    DepartureDate,
    ReturnDate,
    Price,
}

impl Attribute {
    pub fn name(self) -> &'static str {
        match self {
            Attribute::DepartureDate => "departure_date",
            Attribute::ReturnDate => "return_date",
            Attribute::Price => "price",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One trip found on a results page.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub price: Price,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {}",
            Attribute::DepartureDate,
            self.departure_date.format(DISPLAY_DATE_FORMAT)
        )?;
        writeln!(
            f,
            "{}: {}",
            Attribute::ReturnDate,
            self.return_date.format(DISPLAY_DATE_FORMAT)
        )?;
        writeln!(f, "{}: {}", Attribute::Price, self.price)
    }
}

/// The matching trips of one country. Only built when at least one trip
/// passed the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryResult {
    pub name: String,
    pub url: String,
    pub records: Vec<Record>,
}

use std::collections::BTreeSet;

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::{
    error::FlightError,
    price::Price,
    record::{Attribute, Record},
    text_manipulators::{compile_selector, extract_text, parse_last_token_date},
};

/// Where the interesting bits live on a search results page.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Exact text of the label next to an outbound date.
    pub departure_marker: String,
    /// Exact text of the label next to a return date.
    pub return_marker: String,
    /// Class of the span holding a date, a sibling of the marker label.
    pub date_class: String,
    /// Class of the span holding a price tag.
    pub price_class: String,
    /// chrono format of the last token of a date span.
    pub date_format: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            departure_marker: "There".to_string(),
            return_marker: "Back".to_string(),
            date_class: "date".to_string(),
            price_class: "doubleUnderline".to_string(),
            date_format: "%d/%m/%y".to_string(),
        }
    }
}

/// Every value of every tracked field of one page, each in document order.
///
/// The three sequences are scanned independently; the only thing tying the
/// n-th departure date to the n-th price is their position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBatches {
    pub departure_dates: Vec<NaiveDate>,
    pub return_dates: Vec<NaiveDate>,
    pub prices: Vec<Price>,
}

impl AttributeBatches {
    pub fn lengths(&self) -> [(Attribute, usize); 3] {
        [
            (Attribute::DepartureDate, self.departure_dates.len()),
            (Attribute::ReturnDate, self.return_dates.len()),
            (Attribute::Price, self.prices.len()),
        ]
    }

    /// Pairs the batches up position by position. Refuses to do so unless
    /// all of them have the same length.
    pub fn into_records(self, country: &str) -> Result<Vec<Record>, FlightError> {
        let lengths: BTreeSet<usize> = self.lengths().iter().map(|(_, len)| *len).collect();
        if lengths.len() > 1 {
            return Err(FlightError::Structural {
                country: country.to_string(),
                lengths,
            });
        }

        let records = self
            .departure_dates
            .into_iter()
            .zip(self.return_dates)
            .zip(self.prices)
            .map(|((departure_date, return_date), price)| Record {
                departure_date,
                return_date,
                price,
            })
            .collect();
        Ok(records)
    }
}

pub struct TripExtractor {
    config: ExtractorConfig,
    span_selector: Selector,
    date_selector: Selector,
    price_selector: Selector,
}

impl TripExtractor {
    pub fn new(config: ExtractorConfig) -> anyhow::Result<Self> {
        let span_selector = compile_selector("span")?;
        let date_selector = compile_selector(&format!("span.{}", config.date_class))?;
        let price_selector = compile_selector(&format!("span.{}", config.price_class))?;
        Ok(Self {
            config,
            span_selector,
            date_selector,
            price_selector,
        })
    }

    /// Scans a page for all departure dates, return dates and prices. Any
    /// malformed node fails the whole extraction.
    pub fn extract(&self, document: &Html) -> Result<AttributeBatches, FlightError> {
        let departure_dates = self.marked_dates(
            document,
            &self.config.departure_marker,
            Attribute::DepartureDate,
        )?;
        let return_dates =
            self.marked_dates(document, &self.config.return_marker, Attribute::ReturnDate)?;
        let prices = self.prices(document)?;

        Ok(AttributeBatches {
            departure_dates,
            return_dates,
            prices,
        })
    }

    fn marked_dates(
        &self,
        document: &Html,
        marker: &str,
        attribute: Attribute,
    ) -> Result<Vec<NaiveDate>, FlightError> {
        self.marker_containers(document, marker)
            .map(|container| {
                let raw = squash_whitespace(&extract_text(container));
                let date_node = container
                    .select(&self.date_selector)
                    .next()
                    .ok_or_else(|| FlightError::parse(attribute, &raw, "no date element"))?;
                parse_last_token_date(&extract_text(date_node), &self.config.date_format)
                    .map_err(|reason| FlightError::parse(attribute, &raw, &reason))
            })
            .collect()
    }

    /// The parents of every span whose whole text is exactly `marker`.
    fn marker_containers<'a>(
        &'a self,
        document: &'a Html,
        marker: &'a str,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        document
            .select(&self.span_selector)
            .filter(move |span| extract_text(*span) == marker)
            .filter_map(|span| span.parent().and_then(ElementRef::wrap))
    }

    fn prices(&self, document: &Html) -> Result<Vec<Price>, FlightError> {
        document
            .select(&self.price_selector)
            .map(|node| Price::parse(&extract_text(node)))
            .collect()
    }
}

fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

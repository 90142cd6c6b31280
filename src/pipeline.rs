use std::future::Future;

use log::{debug, info};
use scraper::Html;

use crate::{
    config::CountryTarget,
    error::FlightError,
    extractor::TripExtractor,
    filter::FilterConfig,
    proxies::ProxyRoute,
    record::{CountryResult, Record},
};

/// Anything that can turn a URL into page HTML, optionally through a proxy.
pub trait PageFetcher {
    fn fetch(
        &self,
        url: &str,
        route: Option<&ProxyRoute>,
    ) -> impl Future<Output = anyhow::Result<String>>;
}

pub struct Pipeline {
    extractor: TripExtractor,
    filter: FilterConfig,
    routes: Vec<ProxyRoute>,
}

impl Pipeline {
    pub fn new(extractor: TripExtractor, filter: FilterConfig) -> Self {
        Self {
            extractor,
            filter,
            routes: vec![],
        }
    }

    /// Fetch every country page through one of `routes`, rotating by
    /// country. Without routes pages are fetched directly.
    pub fn with_routes(mut self, routes: Vec<ProxyRoute>) -> Self {
        self.routes = routes;
        self
    }

    pub fn route_for(&self, country_index: usize) -> Option<&ProxyRoute> {
        if self.routes.is_empty() {
            return None;
        }
        self.routes.get(country_index % self.routes.len())
    }

    /// Extracts, pairs and filters the trips of one page, keeping page order.
    pub fn matching_records(&self, country: &str, html: &str) -> Result<Vec<Record>, FlightError> {
        let document = Html::parse_document(html);
        let batches = self.extractor.extract(&document)?;
        let records = batches.into_records(country)?;
        let found = records.len();

        let matching: Vec<Record> = records
            .into_iter()
            .filter(|record| self.filter.matches(record))
            .collect();
        info!(
            "{country}: {found} trips on the page, {} match the filter",
            matching.len()
        );
        Ok(matching)
    }

    /// Scrapes every country in order. The first fault aborts the whole run;
    /// countries without matches are left out of the result.
    pub async fn run(
        &self,
        countries: &[CountryTarget],
        fetcher: &impl PageFetcher,
    ) -> Result<Vec<CountryResult>, FlightError> {
        let mut results = vec![];
        for (index, country) in countries.iter().enumerate() {
            let route = self.route_for(index);
            match route {
                Some(route) if route.covers(&country.url) => {
                    debug!("Fetching {} ({}) {route}", country.name, country.url)
                }
                Some(route) => debug!(
                    "Fetching {} ({}) directly, {route} does not carry this scheme",
                    country.name, country.url
                ),
                None => debug!("Fetching {} ({}) directly", country.name, country.url),
            }

            let html = fetcher
                .fetch(&country.url, route)
                .await
                .map_err(|err| FlightError::transport(&country.url, err))?;
            let records = self.matching_records(&country.name, &html)?;

            if !records.is_empty() {
                results.push(CountryResult {
                    name: country.name.clone(),
                    url: country.url.clone(),
                    records,
                });
            }
        }
        Ok(results)
    }
}

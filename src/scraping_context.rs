use log::info;

use crate::{
    config::ScrapingConfig,
    extractor::{ExtractorConfig, TripExtractor},
    pipeline::Pipeline,
    proxies::fetch_proxy_routes,
    record::CountryResult,
    requests::RequestClient,
};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub extractor_config: ExtractorConfig,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_config = ScrapingConfig::new()?;
        let request_client = RequestClient::new()?;
        Ok(ScrapingContext {
            scraping_config,
            extractor_config: ExtractorConfig::default(),
            request_client,
        })
    }

    /// One full scrape: proxies (if enabled), then every country in order.
    pub async fn scrape(&self) -> anyhow::Result<Vec<CountryResult>> {
        let routes = match &self.scraping_config.proxy_list_url {
            Some(url) => fetch_proxy_routes(&self.request_client, url).await?,
            None => vec![],
        };

        let extractor = TripExtractor::new(self.extractor_config.clone())?;
        let pipeline =
            Pipeline::new(extractor, self.scraping_config.filter.clone()).with_routes(routes);

        info!(
            "Scraping {} countries for departures {} to {} under {}",
            self.scraping_config.countries.len(),
            self.scraping_config.filter.departure_from,
            self.scraping_config.filter.departure_to,
            self.scraping_config.filter.price_ceiling
        );
        let results = pipeline
            .run(&self.scraping_config.countries, &self.request_client)
            .await?;
        Ok(results)
    }
}

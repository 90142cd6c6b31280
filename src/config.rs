use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use serde::{Deserialize, de::DeserializeOwned};

use crate::filter::FilterConfig;

/// Format of the departure window dates in the environment, e.g. `01/05/20`.
pub const ENV_DATE_FORMAT: &str = "%d/%m/%y";

/// A country whose search results page gets scraped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryTarget {
    pub name: String,
    pub url: String,
}

/// The env vars needed for scraping.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    departure_from: String,
    departure_to: String,
    price_ceiling: f64,
    #[serde(default = "default_countries_file")]
    countries_file: PathBuf,
    #[serde(default)]
    use_proxies: bool,
    #[serde(default = "default_proxy_list_url")]
    proxy_list_url: String,
}

fn default_countries_file() -> PathBuf {
    PathBuf::from("countries.json")
}

fn default_proxy_list_url() -> String {
    "https://www.sslproxies.org".to_string()
}

pub struct ScrapingConfig {
    pub filter: FilterConfig,
    pub countries: Vec<CountryTarget>,
    /// `None` when pages are fetched directly.
    pub proxy_list_url: Option<String>,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Self::from_env(scraping_env)
    }

    pub fn from_env(scraping_env: ScrapingEnv) -> anyhow::Result<Self> {
        let filter = parse_filter(
            &scraping_env.departure_from,
            &scraping_env.departure_to,
            scraping_env.price_ceiling,
        )?;
        let countries = load_countries(&scraping_env.countries_file)?;
        let proxy_list_url = scraping_env
            .use_proxies
            .then_some(scraping_env.proxy_list_url);
        Ok(Self {
            filter,
            countries,
            proxy_list_url,
        })
    }
}

pub fn parse_filter(
    departure_from: &str,
    departure_to: &str,
    price_ceiling: f64,
) -> anyhow::Result<FilterConfig> {
    let parse_date = |name: &str, value: &str| {
        NaiveDate::parse_from_str(value.trim(), ENV_DATE_FORMAT)
            .with_context(|| format!("{name} must look like DD/MM/YY, got {value:?}"))
    };
    let departure_from = parse_date("DEPARTURE_FROM", departure_from)?;
    let departure_to = parse_date("DEPARTURE_TO", departure_to)?;

    if departure_from > departure_to {
        bail!("DEPARTURE_FROM ({departure_from}) is after DEPARTURE_TO ({departure_to})");
    }
    if !price_ceiling.is_finite() || price_ceiling < 0.0 {
        bail!("PRICE_CEILING must be a non-negative number, got {price_ceiling}");
    }

    Ok(FilterConfig {
        departure_from,
        departure_to,
        price_ceiling,
    })
}

/// Reads a JSON array of `{"name": .., "url": ..}`. Array order is scrape order.
pub fn load_countries(path: &Path) -> anyhow::Result<Vec<CountryTarget>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read countries file {}", path.display()))?;
    let countries = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse countries file {}", path.display()))?;
    Ok(countries)
}

/// The env vars needed for mailing the results.
#[derive(Debug, Deserialize)]
pub struct MailConfig {
    pub email_address: String,
    pub email_password: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}

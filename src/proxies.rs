use std::fmt;

use anyhow::Context;
use log::{info, warn};
use regex::Regex;
use reqwest::Url;
use scraper::Html;

use crate::{
    pipeline::PageFetcher,
    text_manipulators::{compile_selector, extract_text},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyScheme {
    Http,
    Https,
}

impl ProxyScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyScheme::Http => "http",
            ProxyScheme::Https => "https",
        }
    }
}

/// A public proxy and the kind of traffic it is used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRoute {
    pub scheme: ProxyScheme,
    /// `ip:port`
    pub address: String,
}

impl ProxyRoute {
    pub fn proxy_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Whether requests to `url` actually go through this proxy. A route only
    /// carries traffic of its own scheme; anything else is sent directly.
    pub fn covers(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|url| url.scheme() == self.scheme.as_str())
    }
}

impl fmt::Display for ProxyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {}", self.scheme.as_str(), self.address)
    }
}

/// Reads the proxy table of a free proxy-list page. Rows whose first cell
/// isn't an IPv4 address, or that are too short, are skipped.
pub fn parse_proxy_list(html: &str) -> anyhow::Result<Vec<ProxyRoute>> {
    let ip_regex = Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$")?;
    let row_selector = compile_selector("tr")?;
    let cell_selector = compile_selector("td")?;
    let document = Html::parse_document(html);

    let mut routes = vec![];
    for row_node in document.select(&row_selector) {
        let cells: Vec<String> = row_node
            .select(&cell_selector)
            .map(|cell| extract_text(cell).trim().to_string())
            .collect();
        let [ip, port, _, _, _, _, https, ..] = cells.as_slice() else {
            continue;
        };
        if !ip_regex.is_match(ip) || port.parse::<u16>().is_err() {
            continue;
        }
        let scheme = if https.eq_ignore_ascii_case("yes") {
            ProxyScheme::Https
        } else {
            ProxyScheme::Http
        };
        routes.push(ProxyRoute {
            scheme,
            address: format!("{ip}:{port}"),
        });
    }

    Ok(routes)
}

pub async fn fetch_proxy_routes(
    fetcher: &impl PageFetcher,
    proxy_list_url: &str,
) -> anyhow::Result<Vec<ProxyRoute>> {
    let html = fetcher
        .fetch(proxy_list_url, None)
        .await
        .with_context(|| format!("failed to fetch proxy list from {proxy_list_url}"))?;
    let routes = parse_proxy_list(&html)?;
    if routes.is_empty() {
        warn!("No proxies found at {proxy_list_url}, fetching pages directly");
    } else {
        info!("Loaded {} proxies from {proxy_list_url}", routes.len());
    }
    Ok(routes)
}

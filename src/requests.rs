use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, ClientBuilder, Proxy, Response};

use crate::{
    pipeline::PageFetcher,
    proxies::{ProxyRoute, ProxyScheme},
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = Self::builder().build()?;
        Ok(Self { client })
    }

    fn builder() -> ClientBuilder {
        ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
    }

    /// A one-off client for proxied requests; direct requests share one.
    fn proxied_client(route: &ProxyRoute) -> anyhow::Result<Client> {
        let proxy = match route.scheme {
            ProxyScheme::Http => Proxy::http(route.proxy_url()),
            ProxyScheme::Https => Proxy::https(route.proxy_url()),
        }
        .with_context(|| format!("invalid proxy {route}"))?;
        let client = Self::builder().proxy(proxy).build()?;
        Ok(client)
    }

    pub async fn fetch_url_response(
        &self,
        url: &str,
        route: Option<&ProxyRoute>,
    ) -> anyhow::Result<Response> {
        let response = match route {
            Some(route) => Self::proxied_client(route)?.get(url).send().await?,
            None => self.client.get(url).send().await?,
        };
        Ok(response.error_for_status()?)
    }

    pub async fn fetch_url_body(
        &self,
        url: &str,
        route: Option<&ProxyRoute>,
    ) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url, route).await?;
        let body = response.text().await?;
        Ok(body)
    }
}

impl PageFetcher for RequestClient {
    async fn fetch(&self, url: &str, route: Option<&ProxyRoute>) -> anyhow::Result<String> {
        self.fetch_url_body(url, route).await
    }
}

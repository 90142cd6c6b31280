mod config;
mod error;
mod extractor;
mod filter;
mod notifier;
mod pipeline;
mod price;
mod proxies;
mod record;
mod reporter;
mod requests;
mod scraping_context;
mod text_manipulators;

pub use config::{CountryTarget, LoadFromEnv, MailConfig, ScrapingConfig, load_countries};
pub use error::FlightError;
pub use extractor::{AttributeBatches, ExtractorConfig, TripExtractor};
pub use filter::{FilterConfig, matches};
pub use notifier::{Notifier, SmtpNotifier, deliver_outcome};
pub use pipeline::{PageFetcher, Pipeline};
pub use price::Price;
pub use proxies::{ProxyRoute, ProxyScheme, fetch_proxy_routes, parse_proxy_list};
pub use record::{Attribute, CountryResult, Record};
pub use reporter::{FaultReport, Message, RunOutcome, render, render_fault};
pub use requests::RequestClient;
pub use scraping_context::ScrapingContext;

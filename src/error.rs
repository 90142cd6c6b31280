use std::collections::BTreeSet;

use thiserror::Error;

use crate::record::Attribute;

/// Everything that can go wrong while turning one country's page into trips.
#[derive(Debug, Error)]
pub enum FlightError {
    /// A node on the page did not have the expected shape.
    #[error("could not parse {attribute} from {raw:?}: {reason}")]
    Parse {
        attribute: Attribute,
        raw: String,
        reason: String,
    },

    /// The independently scanned fields disagree on how many trips the page
    /// holds, so positional pairing would mix up trips.
    #[error("page for {country} got different quantities in search results: {lengths:?}")]
    Structural {
        country: String,
        lengths: BTreeSet<usize>,
    },

    #[error("failed to fetch {url}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl FlightError {
    pub fn parse(attribute: Attribute, raw: &str, reason: &str) -> Self {
        FlightError::Parse {
            attribute,
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn transport(url: &str, source: anyhow::Error) -> Self {
        FlightError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }
}

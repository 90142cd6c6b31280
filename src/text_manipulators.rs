use anyhow::anyhow;
use chrono::NaiveDate;
use scraper::{ElementRef, Selector};

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

pub fn compile_selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow!("invalid selector `{css}`: {err}"))
}

/// Parses the date held in the last whitespace-delimited token of `text`,
/// e.g. `"Sun 10/05/20"` with format `%d/%m/%y`.
pub fn parse_last_token_date(text: &str, format: &str) -> Result<NaiveDate, String> {
    let token = text
        .split_whitespace()
        .last()
        .ok_or_else(|| "no date token".to_string())?;
    NaiveDate::parse_from_str(token, format).map_err(|err| format!("{token:?}: {err}"))
}

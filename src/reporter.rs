use std::backtrace::BacktraceStatus;

use log::{error, info};

use crate::record::CountryResult;

pub const FAILURE_SUBJECT: &str = "!!!FAILED!!! FINDING CHEAP FLIGHTS";

/// Plain-text listing of every matching trip, grouped by country.
pub fn render(results: &[CountryResult]) -> String {
    let mut body = String::new();
    for country in results {
        body.push_str(&country.name.to_uppercase());
        body.push('\n');
        body.push_str(&country.url);
        body.push('\n');
        for record in &country.records {
            body.push_str(&record.to_string());
            body.push('\n');
        }
    }
    body
}

pub fn matches_subject(results: &[CountryResult]) -> String {
    let names: Vec<&str> = results.iter().map(|country| country.name.as_str()).collect();
    format!("FOUND CHEAP TICKETS TO {}!!!", names.join(", "))
}

/// A caught fault, flattened to text.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultReport {
    pub message: String,
    /// The cause chain, then the backtrace frames if one was captured.
    pub trace: Vec<String>,
}

impl FaultReport {
    pub fn capture(err: &anyhow::Error) -> Self {
        let message = [err.to_string(), format!("{err:?}")]
            .into_iter()
            .find(|text| !text.trim().is_empty())
            .unwrap_or_else(|| "unknown failure".to_string());

        let mut trace: Vec<String> = err
            .chain()
            .enumerate()
            .map(|(depth, cause)| format!("{depth}: {cause}"))
            .collect();
        let backtrace = err.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            trace.extend(backtrace.to_string().lines().map(str::to_string));
        }

        Self { message, trace }
    }
}

pub fn render_fault(fault: &FaultReport) -> String {
    let mut body = String::new();
    if !fault.message.is_empty() {
        body.push_str(&fault.message);
        body.push('\n');
    }
    for line in &fault.trace {
        body.push_str(line);
        body.push('\n');
    }
    body
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

/// How a run ended. Only matches and failures are worth a message.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Matches(Vec<CountryResult>),
    NoMatches,
    Failed(FaultReport),
}

impl RunOutcome {
    pub fn from_result(result: anyhow::Result<Vec<CountryResult>>) -> Self {
        match result {
            Ok(results) if results.is_empty() => {
                info!("No cheap flights found");
                RunOutcome::NoMatches
            }
            Ok(results) => {
                info!("Found cheap flights to {} countries", results.len());
                RunOutcome::Matches(results)
            }
            Err(err) => {
                error!("Scraping failed: {err:#}");
                RunOutcome::Failed(FaultReport::capture(&err))
            }
        }
    }

    pub fn message(&self) -> Option<Message> {
        match self {
            RunOutcome::Matches(results) => Some(Message {
                subject: matches_subject(results),
                body: render(results),
            }),
            RunOutcome::NoMatches => None,
            RunOutcome::Failed(fault) => Some(Message {
                subject: FAILURE_SUBJECT.to_string(),
                body: render_fault(fault),
            }),
        }
    }
}

use std::{cell::RefCell, collections::HashMap};

use anyhow::anyhow;
use chrono::NaiveDate;
use cheap_flights::{
    CountryTarget, ExtractorConfig, FilterConfig, FlightError, Message, Notifier, PageFetcher,
    Pipeline, ProxyRoute, RunOutcome, TripExtractor, deliver_outcome,
};

struct FixtureFetcher {
    pages: HashMap<String, String>,
}

impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str, _route: Option<&ProxyRoute>) -> anyhow::Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no route to host for {url}"))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: RefCell<Vec<Message>>,
}

impl Notifier for RecordingNotifier {
    async fn deliver(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        self.sent.borrow_mut().push(Message {
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

const SEARCH_RESULTS: &str = r#"
<html><body>
  <div class="result">
    <div class="leg"><span>There</span><span class="date">Sun 10/05/20</span></div>
    <div class="leg"><span>Back</span><span class="date">Sun 17/05/20</span></div>
    <div class="fare"><span class="doubleUnderline">$250</span></div>
  </div>
  <div class="result">
    <div class="leg"><span>There</span><span class="date">Wed 01/07/20</span></div>
    <div class="leg"><span>Back</span><span class="date">Wed 08/07/20</span></div>
    <div class="fare"><span class="doubleUnderline">$280</span></div>
  </div>
</body></html>"#;

const EXPENSIVE_RESULTS: &str = r#"
<html><body>
  <div class="leg"><span>There</span><span class="date">Sun 10/05/20</span></div>
  <div class="leg"><span>Back</span><span class="date">Sun 17/05/20</span></div>
  <span class="doubleUnderline">$950</span>
</body></html>"#;

const BROKEN_PRICE: &str = r#"
<html><body>
  <div class="leg"><span>There</span><span class="date">Sun 10/05/20</span></div>
  <div class="leg"><span>Back</span><span class="date">Sun 17/05/20</span></div>
  <span class="doubleUnderline">€abc</span>
</body></html>"#;

fn pipeline() -> Pipeline {
    let filter = FilterConfig {
        departure_from: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
        departure_to: NaiveDate::from_ymd_opt(2020, 6, 20).unwrap(),
        price_ceiling: 300.0,
    };
    Pipeline::new(TripExtractor::new(ExtractorConfig::default()).unwrap(), filter)
}

fn targets(pages: &[(&str, &str)]) -> (Vec<CountryTarget>, FixtureFetcher) {
    let countries = pages
        .iter()
        .map(|(name, _)| CountryTarget {
            name: name.to_string(),
            url: format!("https://flights.test/{name}"),
        })
        .collect();
    let pages = pages
        .iter()
        .map(|(name, html)| (format!("https://flights.test/{name}"), html.to_string()))
        .collect();
    (countries, FixtureFetcher { pages })
}

async fn run(countries: &[CountryTarget], fetcher: &FixtureFetcher) -> RunOutcome {
    let result = pipeline()
        .run(countries, fetcher)
        .await
        .map_err(anyhow::Error::from);
    RunOutcome::from_result(result)
}

#[tokio::test]
async fn matching_trips_are_mailed_once() {
    let (countries, fetcher) =
        targets(&[("spain", SEARCH_RESULTS), ("norway", EXPENSIVE_RESULTS)]);
    let notifier = RecordingNotifier::default();

    let outcome = run(&countries, &fetcher).await;
    let sent = deliver_outcome(&outcome, &notifier).await.unwrap();

    assert!(sent);
    let messages = notifier.sent.borrow();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].subject, "FOUND CHEAP TICKETS TO spain!!!");
    assert_eq!(
        messages[0].body,
        "SPAIN\nhttps://flights.test/spain\n\
         departure_date: 10 May 2020\nreturn_date: 17 May 2020\nprice: $250.00\n\n"
    );
}

#[tokio::test]
async fn nothing_is_sent_when_nothing_matches() {
    let (countries, fetcher) =
        targets(&[("norway", EXPENSIVE_RESULTS), ("iceland", "<html></html>")]);
    let notifier = RecordingNotifier::default();

    let outcome = run(&countries, &fetcher).await;
    let sent = deliver_outcome(&outcome, &notifier).await.unwrap();

    assert_eq!(outcome, RunOutcome::NoMatches);
    assert!(!sent);
    assert!(notifier.sent.borrow().is_empty());
}

#[tokio::test]
async fn a_parse_fault_replaces_the_results_with_a_failure_report() {
    let (countries, fetcher) = targets(&[("spain", SEARCH_RESULTS), ("italy", BROKEN_PRICE)]);
    let notifier = RecordingNotifier::default();

    let outcome = run(&countries, &fetcher).await;
    deliver_outcome(&outcome, &notifier).await.unwrap();

    let messages = notifier.sent.borrow();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].subject, "!!!FAILED!!! FINDING CHEAP FLIGHTS");
    assert!(messages[0].body.contains("€abc"));
    assert!(!messages[0].body.contains("SPAIN"));
}

#[tokio::test]
async fn a_transport_fault_is_reported_with_its_cause() {
    let (countries, _) = targets(&[("spain", SEARCH_RESULTS)]);
    let fetcher = FixtureFetcher {
        pages: HashMap::new(),
    };

    let outcome = run(&countries, &fetcher).await;

    let RunOutcome::Failed(fault) = &outcome else {
        panic!("expected a failure, got {outcome:?}");
    };
    assert_eq!(fault.message, "failed to fetch https://flights.test/spain");
    assert!(
        fault
            .trace
            .iter()
            .any(|line| line.contains("no route to host"))
    );
}

#[tokio::test]
async fn structural_faults_surface_the_observed_lengths() {
    let lopsided =
        SEARCH_RESULTS.replacen(r#"<span class="doubleUnderline">$280</span>"#, "", 1);
    let (countries, fetcher) = targets(&[("spain", lopsided.as_str())]);

    let err = pipeline().run(&countries, &fetcher).await.unwrap_err();

    assert!(matches!(err, FlightError::Structural { .. }));
    assert_eq!(
        err.to_string(),
        "page for spain got different quantities in search results: {1, 2}"
    );
}

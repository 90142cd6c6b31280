use cheap_flights::{
    LoadFromEnv, MailConfig, RunOutcome, ScrapingContext, SmtpNotifier, deliver_outcome,
};
use dotenv::dotenv;
use env_logger::Env;
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let context = ScrapingContext::new()?;
    let notifier = SmtpNotifier::new(MailConfig::load_from_env()?)?;

    let outcome = RunOutcome::from_result(context.scrape().await);
    if !deliver_outcome(&outcome, &notifier).await? {
        info!("Nothing to report");
    }
    Ok(())
}

use std::future::Future;

use anyhow::Context;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use log::info;

use crate::{config::MailConfig, reporter::RunOutcome};

/// Anything that can get a subject and a plain-text body to the user.
pub trait Notifier {
    fn deliver(&self, subject: &str, body: &str) -> impl Future<Output = anyhow::Result<()>>;
}

/// Mails every message to the account it is sent from.
pub struct SmtpNotifier {
    mailbox: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    pub fn new(config: MailConfig) -> anyhow::Result<Self> {
        let mailbox: Mailbox = config
            .email_address
            .parse()
            .with_context(|| format!("invalid EMAIL_ADDRESS {:?}", config.email_address))?;
        let credentials = Credentials::new(config.email_address, config.email_password);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .with_context(|| format!("failed to set up SMTP relay {}", config.smtp_host))?
            .credentials(credentials)
            .build();
        Ok(Self { mailbox, transport })
    }
}

impl Notifier for SmtpNotifier {
    async fn deliver(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        let email = Email::builder()
            .from(self.mailbox.clone())
            .to(self.mailbox.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        self.transport
            .send(email)
            .await
            .context("failed to send email")?;
        info!("Sent \"{subject}\" to {}", self.mailbox);
        Ok(())
    }
}

/// Sends the one message a run is worth, if any. Returns whether anything
/// was sent.
pub async fn deliver_outcome(
    outcome: &RunOutcome,
    notifier: &impl Notifier,
) -> anyhow::Result<bool> {
    let Some(message) = outcome.message() else {
        return Ok(false);
    };
    notifier.deliver(&message.subject, &message.body).await?;
    Ok(true)
}

use crate::configuration::SmtpSettings;
use crate::domain::contact::{
    models::mail::OutgoingMail,
    ports::{MailRelay, MailRelayError},
};
use anyhow::Context;
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::time::Duration;

pub type SmtpRelayTransport = AsyncSmtpTransport<Tokio1Executor>;

/// Relays contact mail from a fixed sender to a fixed recipient over any
/// lettre async transport.
#[derive(Debug, Clone)]
pub struct EmailClient<T = SmtpRelayTransport> {
    transport: T,
    sender: Mailbox,
    recipient: Mailbox,
    timeout: Duration,
}

impl EmailClient<SmtpRelayTransport> {
    /// Builds an authenticated SMTP client. Fails on unusable settings so a
    /// bad deployment is caught at startup, before any request is served.
    pub fn smtp(settings: &SmtpSettings) -> Result<Self, anyhow::Error> {
        let credentials = Credentials::new(
            settings.username.clone(),
            settings.password.expose_secret().clone(),
        );
        let builder = if settings.starttls {
            SmtpRelayTransport::starttls_relay(&settings.host)
                .with_context(|| format!("Invalid SMTP relay host {}", settings.host))?
        } else {
            SmtpRelayTransport::builder_dangerous(&settings.host)
        };
        let transport = builder
            .port(settings.port)
            .credentials(credentials)
            .timeout(Some(settings.timeout()))
            .build();

        Self::new(
            transport,
            settings.sender_email.as_str(),
            settings.recipient_email.as_str(),
            settings.timeout(),
        )
    }
}

impl<T> EmailClient<T>
where
    T: AsyncTransport + Send + Sync + 'static,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    pub fn new(
        transport: T,
        sender: &str,
        recipient: &str,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let sender = sender
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender email address {}", sender))?;
        let recipient = recipient
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid recipient email address {}", recipient))?;

        Ok(Self {
            transport,
            sender,
            recipient,
            timeout,
        })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailRelayError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(mail.subject())
            .header(ContentType::TEXT_PLAIN);

        match mail.reply_to().as_ref().parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => tracing::warn!(
                error = %e,
                "Submitter address is not a valid mailbox, sending without Reply-To"
            ),
        }

        builder
            .body(mail.text_body().to_string())
            .map_err(|e| MailRelayError::InvalidMessage(e.into()))
    }
}

#[async_trait]
impl<T> MailRelay for EmailClient<T>
where
    T: AsyncTransport + Send + Sync + 'static,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    #[tracing::instrument(
        name = "Sending contact mail through the relay",
        skip(self, mail),
        fields(recipient = %self.recipient)
    )]
    async fn send_mail(&self, mail: &OutgoingMail) -> Result<(), MailRelayError> {
        let message = self.build_message(mail)?;

        match tokio::time::timeout(self.timeout, self.transport.send(message)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(MailRelayError::Delivery(e.into())),
            Err(_) => Err(MailRelayError::Timeout(self.timeout)),
        }
    }
}

use anyhow::Context;
use contact_relay::configuration::get_configuration;
use contact_relay::domain::contact::service::Contact;
use contact_relay::inbound::http::Application;
use contact_relay::outbound::notifier::email_client::EmailClient;
use contact_relay::outbound::telemetry::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the environment may already be set.
    dotenvy::dotenv().ok();
    let configuration = get_configuration().context("Failed to read configuration")?;
    init_logger("contact-relay", &configuration.log_level(), std::io::stdout);

    let email_client =
        EmailClient::smtp(&configuration.smtp).context("Failed to configure the SMTP relay")?;
    let contact_service = Contact::new(email_client);
    let rate_limiter = configuration.rate_limit.limiter();
    let application =
        Application::build(contact_service, rate_limiter, configuration.application).await?;

    tracing::info!(port = application.port(), "Server running");
    application.run_until_stopped().await?;
    Ok(())
}

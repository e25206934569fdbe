use async_trait::async_trait;

use super::models::{mail::OutgoingMail, submission::Submission};
use crate::utils::error_chain_fmt;

#[async_trait]
///  Hands a composed mail over to whatever delivers it
pub trait MailRelay: Send + Sync + 'static {
    /// Makes exactly one delivery attempt. A failure is final.
    async fn send_mail(&self, mail: &OutgoingMail) -> Result<(), MailRelayError>;
}

#[derive(thiserror::Error)]
pub enum MailRelayError {
    #[error("Failed to build the outgoing message")]
    InvalidMessage(#[source] anyhow::Error),

    #[error("The mail relay did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("The mail relay rejected or failed to deliver the message")]
    Delivery(#[source] anyhow::Error),
}

impl std::fmt::Debug for MailRelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait ContactService: Send + Sync + 'static {
    async fn relay_submission(&self, submission: Submission) -> Result<(), ContactServiceError>;
}

#[derive(thiserror::Error)]
pub enum ContactServiceError {
    #[error("Failed to relay contact submission")]
    Relay(#[from] MailRelayError),
}

impl std::fmt::Debug for ContactServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

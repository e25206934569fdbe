use async_trait::async_trait;

use super::{
    models::{mail::OutgoingMail, submission::Submission},
    ports::{ContactService, ContactServiceError, MailRelay},
};

#[derive(Debug)]
pub struct Contact<R>
where
    R: MailRelay,
{
    relay: R,
}

impl<R> Contact<R>
where
    R: MailRelay,
{
    pub fn new(relay: R) -> Self {
        Self { relay }
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }
}

#[async_trait]
impl<R> ContactService for Contact<R>
where
    R: MailRelay,
{
    #[tracing::instrument(
        name = "Relaying a contact submission",
        skip(self, submission),
        fields(submitter_email = %submission.email)
    )]
    async fn relay_submission(&self, submission: Submission) -> Result<(), ContactServiceError> {
        let mail = OutgoingMail::from(&submission);
        self.relay.send_mail(&mail).await?;
        Ok(())
    }
}

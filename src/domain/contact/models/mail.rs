use super::email::ContactEmail;
use super::submission::Submission;

pub const CONTACT_MAIL_SUBJECT: &str = "New Message from Website";

/// Plain-text mail relayed for one submission. Sender and recipient are
/// fixed by configuration and belong to the relay, not to the message.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    subject: String,
    text_body: String,
    reply_to: ContactEmail,
}

impl OutgoingMail {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn text_body(&self) -> &str {
        &self.text_body
    }

    pub fn reply_to(&self) -> &ContactEmail {
        &self.reply_to
    }
}

impl From<&Submission> for OutgoingMail {
    fn from(submission: &Submission) -> Self {
        let text_body = format!(
            "Name: {}\nEmail: {}\nMessage: {}",
            submission.full_name.as_ref(),
            submission.email.as_ref(),
            submission.message.as_ref()
        );
        Self {
            subject: CONTACT_MAIL_SUBJECT.to_string(),
            text_body,
            reply_to: submission.email.clone(),
        }
    }
}
